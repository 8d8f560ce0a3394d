use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::persistence::schema::car)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Car {
    pub id: i32,
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

/// Every column except `id`. Used both for inserts and for full-row updates, so
/// `None` always means SQL `NULL`, never "leave as is".
#[derive(Insertable, AsChangeset, Debug, Clone, Default, PartialEq)]
#[diesel(table_name = crate::persistence::schema::car)]
#[diesel(treat_none_as_null = true)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewCar {
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

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchaseValueStats {
    /// `None` when no row has a purchase value.
    pub mean: Option<f64>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationCount {
    pub count: i64,
    pub location_num: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeCount {
    pub count: i64,
    pub make: String,
}
