diesel::table! {
    car (id) {
        id -> Integer,
        #[sql_name = "VIN"]
        vin -> Nullable<Text>,
        #[sql_name = "CarYear"]
        car_year -> Nullable<Integer>,
        #[sql_name = "Color"]
        color -> Nullable<Text>,
        #[sql_name = "VehBody"]
        veh_body -> Nullable<Text>,
        #[sql_name = "EngineType"]
        engine_type -> Nullable<Text>,
        #[sql_name = "Make"]
        make -> Nullable<Text>,
        #[sql_name = "Miles"]
        miles -> Nullable<Double>,
        #[sql_name = "Odometer"]
        odometer -> Nullable<Text>,
        #[sql_name = "Brand"]
        brand -> Nullable<Text>,
        #[sql_name = "LocationNum"]
        location_num -> Nullable<Integer>,
        #[sql_name = "CarType"]
        car_type -> Nullable<Text>,
        #[sql_name = "EngineLiters"]
        engine_liters -> Nullable<Text>,
        #[sql_name = "FuelType"]
        fuel_type -> Nullable<Text>,
        #[sql_name = "Transmission"]
        transmission -> Nullable<Text>,
        #[sql_name = "SaleLoc"]
        sale_loc -> Nullable<Integer>,
        #[sql_name = "PurchVal"]
        purch_val -> Nullable<Double>,
    }
}

/// Idempotent bootstrap for a fresh database file. Columns are only ever added,
/// and always nullable, so rows written by older builds stay readable.
pub const CREATE_CAR_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS car (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    VIN TEXT,
    CarYear INTEGER,
    Color TEXT,
    VehBody TEXT,
    EngineType TEXT,
    Make TEXT,
    Miles REAL,
    Odometer TEXT,
    Brand TEXT,
    LocationNum INTEGER,
    CarType TEXT,
    EngineLiters TEXT,
    FuelType TEXT,
    Transmission TEXT,
    SaleLoc INTEGER,
    PurchVal REAL
);
CREATE INDEX IF NOT EXISTS idx_car_location_num ON car (LocationNum);
CREATE INDEX IF NOT EXISTS idx_car_make ON car (Make);
"#;
