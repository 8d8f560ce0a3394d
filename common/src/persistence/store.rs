use crate::config::Database;
use crate::persistence::models::{Car, LocationCount, MakeCount, NewCar, PurchaseValueStats};
use crate::persistence::schema::car;
use crate::persistence::{SqlitePool, StoreError, ensure_schema, init_sqlite_pool};
use diesel::dsl::{avg, count};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, info, instrument};

/// Threshold used by the grouped reports when the caller gives none.
pub const DEFAULT_MINIMUM_COUNT: i64 = 100;

/// Data access for the `car` table. Cheap to clone; clones share one pool.
#[derive(Clone)]
pub struct CarStore {
    pool: SqlitePool,
}

impl CarStore {
    /// Builds the connection pool and makes sure the table exists.
    pub async fn open(config: &Database) -> Result<Self, StoreError> {
        let pool = init_sqlite_pool(config)?;
        ensure_schema(&pool).await?;
        info!("opened car store at `{}`", config.path);
        Ok(Self { pool })
    }

    pub fn close(&self) {
        self.pool.close();
        info!("closed car store");
    }

    #[instrument(skip_all)]
    pub async fn list(&self) -> Result<Vec<Car>, StoreError> {
        let mut conn = self.pool.get().await?;
        let cars = car::table
            .order(car::id.asc())
            .select(Car::as_select())
            .load(&mut conn)
            .await?;
        debug!("listed `{}` cars", cars.len());
        Ok(cars)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Car>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(car::table
            .find(id)
            .select(Car::as_select())
            .first(&mut conn)
            .await
            .optional()?)
    }

    /// Outer `None` means no such car; inner `None` means the column is null.
    #[instrument(skip(self))]
    pub async fn odometer(&self, id: i32) -> Result<Option<Option<String>>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(car::table
            .find(id)
            .select(car::odometer)
            .first::<Option<String>>(&mut conn)
            .await
            .optional()?)
    }

    #[instrument(skip_all)]
    pub async fn average_purchase_value(&self) -> Result<PurchaseValueStats, StoreError> {
        let mut conn = self.pool.get().await?;
        let (mean, total) = car::table
            .select((avg(car::purch_val), count(car::purch_val)))
            .get_result::<(Option<f64>, i64)>(&mut conn)
            .await?;
        debug!("average purchase value `{mean:?}` over `{total}` cars");
        Ok(PurchaseValueStats { mean, total })
    }

    /// Cars per acquiring store, keeping only stores with more than
    /// `minimum_count` cars. Rows without a location are not counted.
    #[instrument(skip(self))]
    pub async fn count_by_location(
        &self,
        minimum_count: i64,
    ) -> Result<Vec<LocationCount>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = car::table
            .filter(car::location_num.is_not_null())
            .group_by(car::location_num)
            .select((count(car::location_num), car::location_num))
            .having(count(car::location_num).gt(minimum_count))
            .order_by((count(car::location_num).desc(), car::location_num.asc()))
            .load::<(i64, Option<i32>)>(&mut conn)
            .await?;
        debug!("`{}` locations above `{minimum_count}` cars", rows.len());
        Ok(rows
            .into_iter()
            .filter_map(|(count, location_num)| {
                location_num.map(|location_num| LocationCount {
                    count,
                    location_num,
                })
            })
            .collect())
    }

    /// Same contract as [`CarStore::count_by_location`], grouped by make.
    #[instrument(skip(self))]
    pub async fn count_by_make(&self, minimum_count: i64) -> Result<Vec<MakeCount>, StoreError> {
        let mut conn = self.pool.get().await?;
        let rows = car::table
            .filter(car::make.is_not_null())
            .group_by(car::make)
            .select((count(car::make), car::make))
            .having(count(car::make).gt(minimum_count))
            .order_by((count(car::make).desc(), car::make.asc()))
            .load::<(i64, Option<String>)>(&mut conn)
            .await?;
        debug!("`{}` makes above `{minimum_count}` cars", rows.len());
        Ok(rows
            .into_iter()
            .filter_map(|(count, make)| make.map(|make| MakeCount { count, make }))
            .collect())
    }

    #[instrument(skip_all)]
    pub async fn create(&self, new_car: NewCar) -> Result<Car, StoreError> {
        let mut conn = self.pool.get().await?;
        let created = diesel::insert_into(car::table)
            .values(&new_car)
            .returning(Car::as_returning())
            .get_result(&mut conn)
            .await?;
        debug!("created car `{}`", created.id);
        Ok(created)
    }

    /// Inserts all cars in one transaction and returns their ids in input order.
    #[instrument(skip_all)]
    pub async fn create_many(&self, new_cars: Vec<NewCar>) -> Result<Vec<i32>, StoreError> {
        let mut conn = self.pool.get().await?;
        conn.transaction::<_, StoreError, _>(|conn| {
            async move {
                debug!("cars to create `{}`", new_cars.len());
                let mut ids = Vec::with_capacity(new_cars.len());
                for new_car in &new_cars {
                    let id = diesel::insert_into(car::table)
                        .values(new_car)
                        .returning(car::id)
                        .get_result::<i32>(conn)
                        .await?;
                    ids.push(id);
                }
                debug!("created `{}` cars", ids.len());
                Ok(ids)
            }
            .scope_boxed()
        })
        .await
    }

    /// Replaces every column but `id`. Returns `None` when the car does not exist.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: NewCar) -> Result<Option<Car>, StoreError> {
        let mut conn = self.pool.get().await?;
        Ok(diesel::update(car::table.find(id))
            .set(&changes)
            .returning(Car::as_returning())
            .get_result(&mut conn)
            .await
            .optional()?)
    }

    /// Returns `false` when the car does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(car::table.find(id))
            .execute(&mut conn)
            .await?;
        Ok(deleted > 0)
    }
}
