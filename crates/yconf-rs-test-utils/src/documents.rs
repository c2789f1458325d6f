/// A valid document for [`crate::pet_schema`], keys out of declared order.
pub const PET_YAML: &str = "\
names:
  - Fido
  - Rex
pet: dog
weight: 12.5
owner:
  name: Sam
  email: sam@example.org
";

/// A valid document for [`crate::fleet_schema`].
pub const FLEET_YAML: &str = "\
cars:
  - color: red
    make: Ford
    year: 1967
    accessories:
      roof: rack
      rear: hitch
  - color: blue
garages:
  _:
    spaces: 2
    city: Ljubljana
  north: {}
  south:
    spaces: 4
    door: swing
notes:
  - first line
  - second line
";
