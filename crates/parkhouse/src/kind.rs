//! Spot kinds. The set is closed: every spot and every request carries one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownKind;

/// Vehicle class a spot is built for.
///
/// The derived ordering is the order kinds are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotKind {
    Bike,
    Car,
    Truck,
}

impl SpotKind {
    pub const ALL: [SpotKind; 3] = [SpotKind::Bike, SpotKind::Car, SpotKind::Truck];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpotKind::Bike => "bike",
            SpotKind::Car => "car",
            SpotKind::Truck => "truck",
        }
    }
}

impl fmt::Display for SpotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpotKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bike" => Ok(SpotKind::Bike),
            "car" => Ok(SpotKind::Car),
            "truck" => Ok(SpotKind::Truck),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Car".parse::<SpotKind>().unwrap(), SpotKind::Car);
        assert_eq!(" TRUCK ".parse::<SpotKind>().unwrap(), SpotKind::Truck);
        assert_eq!("bike".parse::<SpotKind>().unwrap(), SpotKind::Bike);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "scooter".parse::<SpotKind>().unwrap_err();
        assert_eq!(err, UnknownKind("scooter".to_string()));
        assert!(err.to_string().contains("scooter"));
    }

    #[test]
    fn serializes_lowercase() {
        insta::assert_json_snapshot!(SpotKind::ALL, @r#"
        [
          "bike",
          "car",
          "truck"
        ]
        "#);
    }

    #[test]
    fn reporting_order_is_bike_car_truck() {
        let mut kinds = vec![SpotKind::Truck, SpotKind::Bike, SpotKind::Car];
        kinds.sort();
        assert_eq!(kinds, SpotKind::ALL);
    }
}
