//! Wire types. Each one spells out its JSON fields so the storage schema can
//! grow without changing what clients see.

use common::persistence::models;
use common::persistence::store::DEFAULT_MINIMUM_COUNT;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Car {
    #[serde(rename = "id")]
    pub id: i32,
    #[serde(rename = "VIN")]
    pub vin: Option<String>,
    pub car_year: Option<i32>,
    pub color: Option<String>,
    pub veh_body: Option<String>,
    pub engine_type: Option<String>,
    pub make: Option<String>,
    pub miles: Option<f64>,
    pub odometer: Option<String>,
    pub brand: Option<String>,
    pub location_num: Option<i32>,
    pub car_type: Option<String>,
    pub engine_liters: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub sale_loc: Option<i32>,
    pub purch_val: Option<f64>,
}

impl From<models::Car> for Car {
    fn from(value: models::Car) -> Self {
        Self {
            id: value.id,
            vin: value.vin,
            car_year: value.car_year,
            color: value.color,
            veh_body: value.veh_body,
            engine_type: value.engine_type,
            make: value.make,
            miles: value.miles,
            odometer: value.odometer,
            brand: value.brand,
            location_num: value.location_num,
            car_type: value.car_type,
            engine_liters: value.engine_liters,
            fuel_type: value.fuel_type,
            transmission: value.transmission,
            sale_loc: value.sale_loc,
            purch_val: value.purch_val,
        }
    }
}

/// Request body for create and update. Missing fields are stored as null and
/// an `id` field, if sent, is ignored.
#[derive(Deserialize, ToSchema, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CarInput {
    #[serde(rename = "VIN")]
    pub vin: Option<String>,
    pub car_year: Option<i32>,
    pub color: Option<String>,
    pub veh_body: Option<String>,
    pub engine_type: Option<String>,
    pub make: Option<String>,
    pub miles: Option<f64>,
    pub odometer: Option<String>,
    pub brand: Option<String>,
    pub location_num: Option<i32>,
    pub car_type: Option<String>,
    pub engine_liters: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub sale_loc: Option<i32>,
    pub purch_val: Option<f64>,
}

impl From<CarInput> for models::NewCar {
    fn from(value: CarInput) -> Self {
        Self {
            vin: value.vin,
            car_year: value.car_year,
            color: value.color,
            veh_body: value.veh_body,
            engine_type: value.engine_type,
            make: value.make,
            miles: value.miles,
            odometer: value.odometer,
            brand: value.brand,
            location_num: value.location_num,
            car_type: value.car_type,
            engine_liters: value.engine_liters,
            fuel_type: value.fuel_type,
            transmission: value.transmission,
            sale_loc: value.sale_loc,
            purch_val: value.purch_val,
        }
    }
}

/// Mean purchase value and the number of cars it was taken over, both as text.
/// `sum` holds the mean; the name is kept for existing clients.
#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct PurchaseValueSummary {
    #[schema(example = "15000.0")]
    pub sum: String,
    #[schema(example = "2")]
    pub total: String,
}

impl From<models::PurchaseValueStats> for PurchaseValueSummary {
    fn from(value: models::PurchaseValueStats) -> Self {
        // An empty table reports zero rather than null.
        let mean = value.mean.unwrap_or(0.0);
        Self {
            sum: decimal_text(mean),
            total: value.total.to_string(),
        }
    }
}

/// Shortest round-trip text for a float that always shows a fraction or an
/// exponent: `15000.0`, `1e+20`, `1.5e-07`. Exponents carry a sign and at
/// least two digits.
pub fn decimal_text(value: f64) -> String {
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct LocationCount {
    pub count: i64,
    #[serde(rename = "LocationNum")]
    pub location_num: i32,
}

impl From<models::LocationCount> for LocationCount {
    fn from(value: models::LocationCount) -> Self {
        Self {
            count: value.count,
            location_num: value.location_num,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct MakeCount {
    pub count: i64,
    #[serde(rename = "Make")]
    pub make: String,
}

impl From<models::MakeCount> for MakeCount {
    fn from(value: models::MakeCount) -> Self {
        Self {
            count: value.count,
            make: value.make,
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CountFilter {
    /// Only groups with strictly more cars than this are returned.
    #[serde(rename = "CountAtLeast", default = "default_count_at_least")]
    #[param(default = 100)]
    pub count_at_least: i64,
}

fn default_count_at_least() -> i64 {
    DEFAULT_MINIMUM_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_formats_mean_with_fraction() {
        let summary = PurchaseValueSummary::from(models::PurchaseValueStats {
            mean: Some(15000.0),
            total: 2,
        });
        assert_eq!(summary.sum, "15000.0");
        assert_eq!(summary.total, "2");

        let summary = PurchaseValueSummary::from(models::PurchaseValueStats {
            mean: Some(12345.25),
            total: 4,
        });
        assert_eq!(summary.sum, "12345.25");
    }

    #[test]
    fn test_decimal_text_exponents() {
        assert_eq!(decimal_text(1e20), "1e+20");
        assert_eq!(decimal_text(2.5e17), "2.5e+17");
        assert_eq!(decimal_text(1.5e-7), "1.5e-07");
        assert_eq!(decimal_text(1e-123), "1e-123");
        assert_eq!(decimal_text(0.25), "0.25");
        assert_eq!(decimal_text(-3.0), "-3.0");
    }

    #[test]
    fn test_summary_of_empty_table_is_zero() {
        let summary = PurchaseValueSummary::from(models::PurchaseValueStats {
            mean: None,
            total: 0,
        });
        assert_eq!(summary.sum, "0.0");
        assert_eq!(summary.total, "0");
    }

    #[test]
    fn test_car_wire_keys_are_fixed() -> Result<(), Box<dyn std::error::Error>> {
        let car = Car::from(models::Car {
            id: 1,
            vin: None,
            car_year: Some(2019),
            color: None,
            veh_body: None,
            engine_type: None,
            make: Some("Toyota".into()),
            miles: None,
            odometer: None,
            brand: None,
            location_num: Some(5),
            car_type: None,
            engine_liters: None,
            fuel_type: None,
            transmission: None,
            sale_loc: None,
            purch_val: Some(20000.0),
        });
        let value = serde_json::to_value(&car)?;
        let object = value.as_object().ok_or("not an object")?;

        let mut keys = object.keys().map(String::as_str).collect::<Vec<_>>();
        keys.sort_unstable();
        let mut expected = vec![
            "id",
            "VIN",
            "CarYear",
            "Color",
            "VehBody",
            "EngineType",
            "Make",
            "Miles",
            "Odometer",
            "Brand",
            "LocationNum",
            "CarType",
            "EngineLiters",
            "FuelType",
            "Transmission",
            "SaleLoc",
            "PurchVal",
        ];
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(object["Make"], "Toyota");
        assert_eq!(object["VIN"], serde_json::Value::Null);
        Ok(())
    }

    #[test]
    fn test_input_ignores_id() -> Result<(), Box<dyn std::error::Error>> {
        let input: CarInput = serde_json::from_str(r#"{"id": 7, "Make": "Ford", "SaleLoc": 3}"#)?;
        let new_car = models::NewCar::from(input);
        assert_eq!(new_car.make.as_deref(), Some("Ford"));
        assert_eq!(new_car.sale_loc, Some(3));
        assert_eq!(new_car.vin, None);
        Ok(())
    }
}
