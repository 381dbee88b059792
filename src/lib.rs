// Client library for the hotel partner dashboard API

pub mod calendar;
pub mod client;
pub mod date_ranges;
mod endpoints;
pub mod logging;
pub mod models;
pub mod response;
pub mod room_form;
pub mod session;
pub mod validation;

// Re-export key types for convenience
pub use calendar::{
    exclusion_update, find_conflicts, AdjustmentDirection, AdjustmentError, DaySelection,
    PriceAdjustment,
};
pub use client::{ApiError, ClientConfig, ClientError, ClientStats, HotelApiClient, RetryConfig};
pub use date_ranges::{consolidate, consolidate_keys, DateKeyError, DateRange, DayKey, RangeError};
pub use logging::LoggingConfig;
pub use response::{ApiResponse, FieldErrors};
pub use session::{MemoryTokenStore, OtpCooldown, TokenPair, TokenStore};
pub use validation::ValidationErrors;
