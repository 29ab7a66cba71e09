//! Row mapping: one result row as an ordered column → JSON value map.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Number, Value};
use sqlx::postgres::types::{Oid, PgInterval, PgMoney};
use sqlx::postgres::{PgRow, PgTypeInfo, PgTypeKind};
use sqlx::types::ipnetwork::IpNetwork;
use sqlx::types::Decimal;
use sqlx::{Column, Row as _, TypeInfo};

/// Ordered column name → value. Column order follows the result set.
pub type Row = Map<String, Value>;

const SECS_PER_DAY: f64 = 86_400.0;
/// Months in an interval count as 30 days.
const DAYS_PER_MONTH: f64 = 30.0;
/// MONEY carries its value in cents.
const MONEY_FRAC_DIGITS: u32 = 2;

pub fn row_to_map(row: &PgRow) -> Row {
    let mut map = Row::new();
    for (idx, col) in row.columns().iter().enumerate() {
        let type_info = col.type_info();
        let value = match cell_to_value(row, idx, type_info) {
            Ok(Some(v)) => v,
            Ok(None) => {
                tracing::debug!(column = col.name(), pg_type = type_info.name(), "unsupported column type");
                Value::Null
            }
            Err(e) => {
                tracing::debug!(column = col.name(), pg_type = type_info.name(), error = %e, "undecodable cell");
                Value::Null
            }
        };
        map.insert(col.name().to_string(), value);
    }
    map
}

/// `Ok(None)` when the column type has no JSON conversion.
fn cell_to_value(row: &PgRow, idx: usize, type_info: &PgTypeInfo) -> Result<Option<Value>, sqlx::Error> {
    Ok(Some(match type_info.name() {
        "BOOL" => opt(row.try_get::<Option<bool>, _>(idx)?, Value::Bool),
        "INT2" => opt(row.try_get::<Option<i16>, _>(idx)?, |n| Value::Number(n.into())),
        "INT4" => opt(row.try_get::<Option<i32>, _>(idx)?, |n| Value::Number(n.into())),
        "INT8" => opt(row.try_get::<Option<i64>, _>(idx)?, |n| Value::Number(n.into())),
        "OID" => opt(row.try_get::<Option<Oid>, _>(idx)?, |o| Value::Number(o.0.into())),
        "FLOAT4" => opt(row.try_get::<Option<f32>, _>(idx)?, |n| float(n as f64)),
        "FLOAT8" => opt(row.try_get::<Option<f64>, _>(idx)?, float),
        "NUMERIC" => opt(row.try_get::<Option<Decimal>, _>(idx)?, decimal),
        "MONEY" => opt(row.try_get::<Option<PgMoney>, _>(idx)?, |m| {
            decimal(m.to_decimal(MONEY_FRAC_DIGITS))
        }),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            opt(row.try_get::<Option<String>, _>(idx)?, Value::String)
        }
        "UUID" => opt(row.try_get::<Option<uuid::Uuid>, _>(idx)?, |u| Value::String(u.to_string())),
        "TIMESTAMPTZ" => opt(row.try_get::<Option<DateTime<Utc>>, _>(idx)?, timestamptz),
        "TIMESTAMP" => opt(row.try_get::<Option<NaiveDateTime>, _>(idx)?, timestamp),
        "DATE" => opt(row.try_get::<Option<NaiveDate>, _>(idx)?, date),
        "TIME" => opt(row.try_get::<Option<NaiveTime>, _>(idx)?, time),
        "INTERVAL" => opt(row.try_get::<Option<PgInterval>, _>(idx)?, interval),
        "INET" => opt(row.try_get::<Option<IpNetwork>, _>(idx)?, inet),
        "CIDR" => opt(row.try_get::<Option<IpNetwork>, _>(idx)?, |n| Value::String(n.to_string())),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(idx)?.unwrap_or(Value::Null),
        "BYTEA" => opt(row.try_get::<Option<Vec<u8>>, _>(idx)?, |b| {
            Value::String(String::from_utf8_lossy(&b).into_owned())
        }),
        "TEXT[]" | "VARCHAR[]" | "BPCHAR[]" | "NAME[]" => {
            array(row.try_get::<Option<Vec<Option<String>>>, _>(idx)?, Value::String)
        }
        "INT2[]" => array(row.try_get::<Option<Vec<Option<i16>>>, _>(idx)?, |n| Value::Number(n.into())),
        "INT4[]" => array(row.try_get::<Option<Vec<Option<i32>>>, _>(idx)?, |n| Value::Number(n.into())),
        "INT8[]" => array(row.try_get::<Option<Vec<Option<i64>>>, _>(idx)?, |n| Value::Number(n.into())),
        "FLOAT4[]" => array(row.try_get::<Option<Vec<Option<f32>>>, _>(idx)?, |n| float(n as f64)),
        "FLOAT8[]" => array(row.try_get::<Option<Vec<Option<f64>>>, _>(idx)?, float),
        "NUMERIC[]" => array(row.try_get::<Option<Vec<Option<Decimal>>>, _>(idx)?, decimal),
        "BOOL[]" => array(row.try_get::<Option<Vec<Option<bool>>>, _>(idx)?, Value::Bool),
        "UUID[]" => array(row.try_get::<Option<Vec<Option<uuid::Uuid>>>, _>(idx)?, |u| {
            Value::String(u.to_string())
        }),
        "DATE[]" => array(row.try_get::<Option<Vec<Option<NaiveDate>>>, _>(idx)?, date),
        "TIMESTAMP[]" => array(row.try_get::<Option<Vec<Option<NaiveDateTime>>>, _>(idx)?, timestamp),
        "TIMESTAMPTZ[]" => array(row.try_get::<Option<Vec<Option<DateTime<Utc>>>>, _>(idx)?, timestamptz),
        // Enum values travel as their label, even in binary format.
        _ if matches!(type_info.kind(), PgTypeKind::Enum(_)) => {
            opt(row.try_get_unchecked::<Option<String>, _>(idx)?, Value::String)
        }
        _ => return Ok(None),
    }))
}

fn opt<T>(v: Option<T>, f: impl FnOnce(T) -> Value) -> Value {
    v.map(f).unwrap_or(Value::Null)
}

fn array<T>(v: Option<Vec<Option<T>>>, f: impl Fn(T) -> Value) -> Value {
    match v {
        Some(items) => Value::Array(items.into_iter().map(|i| opt(i, &f)).collect()),
        None => Value::Null,
    }
}

fn float(n: f64) -> Value {
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Integral decimals become JSON integers, the rest JSON numbers.
fn decimal(d: Decimal) -> Value {
    let text = d.to_string();
    if d.scale() == 0 {
        if let Ok(n) = text.parse::<i64>() {
            return Value::Number(n.into());
        }
    }
    text.parse::<f64>().map(float).unwrap_or(Value::String(text))
}

fn timestamptz(d: DateTime<Utc>) -> Value {
    Value::String(d.to_rfc3339())
}

fn timestamp(d: NaiveDateTime) -> Value {
    Value::String(d.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
}

fn date(d: NaiveDate) -> Value {
    Value::String(d.format("%Y-%m-%d").to_string())
}

fn time(t: NaiveTime) -> Value {
    Value::String(t.format("%H:%M:%S%.f").to_string())
}

/// Total seconds, as a number.
fn interval(i: PgInterval) -> Value {
    let days = i.months as f64 * DAYS_PER_MONTH + i.days as f64;
    float(days * SECS_PER_DAY + i.microseconds as f64 / 1_000_000.0)
}

/// Host addresses drop the full-length prefix (`10.0.0.1`, not `10.0.0.1/32`).
fn inet(n: IpNetwork) -> Value {
    let full = if n.is_ipv4() { 32 } else { 128 };
    if n.prefix() == full {
        Value::String(n.ip().to_string())
    } else {
        Value::String(n.to_string())
    }
}
