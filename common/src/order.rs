use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::error::{CheckoutField, OrderError};

/// Required length of a customer phone number.
pub const PHONE_DIGITS: usize = 10;

/// Unique order identifier: milliseconds since the epoch at confirmation,
/// bumped when two orders land in the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing, time-based order ids.
#[derive(Debug, Clone, Default)]
pub struct OrderIdGenerator {
    last: Option<i64>,
}

impl OrderIdGenerator {
    pub fn next(&mut self, now: DateTime<Utc>) -> OrderId {
        let stamp = now.timestamp_millis();
        let id = match self.last {
            Some(last) if stamp <= last => last + 1,
            _ => stamp,
        };
        self.last = Some(id);
        OrderId(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Submitted by the shopper; rates are settled at the counter.
    Confirmed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Confirmed => f.write_str("confirmed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub phone: String,
}

/// Requested pickup slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl fmt::Display for Pickup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.time.format("%H:%M"))
    }
}

/// Raw checkout form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub pickup_date: String,
    /// `HH:MM`, as produced by a time input.
    pub pickup_time: String,
}

impl CheckoutForm {
    /// Validate the form. `today` is the earliest allowed pickup date.
    ///
    /// Checks run in a fixed order so the shopper sees one message at a time:
    /// missing fields first, then the phone number, then date and time.
    pub fn validate(&self, today: NaiveDate) -> Result<(CustomerContact, Pickup), OrderError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let date = self.pickup_date.trim();
        let time = self.pickup_time.trim();

        for (value, field) in [
            (name, CheckoutField::Name),
            (phone, CheckoutField::Phone),
            (date, CheckoutField::PickupDate),
            (time, CheckoutField::PickupTime),
        ] {
            if value.is_empty() {
                return Err(OrderError::MissingField(field));
            }
        }

        if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderError::InvalidPhone(phone.to_string()));
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| OrderError::InvalidPickupDate(date.to_string()))?;
        if date < today {
            return Err(OrderError::PickupInPast { date, today });
        }

        let time = NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|_| OrderError::InvalidPickupTime(time.to_string()))?;

        Ok((
            CustomerContact {
                name: name.to_string(),
                phone: phone.to_string(),
            },
            Pickup { date, time },
        ))
    }
}

/// A confirmed pickup order: a snapshot of the cart at confirmation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerContact,
    pub pickup: Pickup,
    pub lines: Vec<CartLine>,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
