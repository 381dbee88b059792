// Data structures exchanged with the hotel partner API.
// Responses arrive in camelCase; room range payloads are PascalCase on the way
// out and accepted in either spelling on the way back.

use crate::date_ranges::DateRange;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

// The API sends `null` for empty lists in a few places.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Room range lists: an entry that does not decode is dropped so the rest of
// the room stays usable.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<T>(entry) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(error = %err, "skipping malformed date range entry");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
    #[serde(
        default,
        rename = "cooldownSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooldown_seconds: Option<u64>,
}

// ---- Auth ----

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub hotel_name: String,
    pub description: String,
    pub location: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_email: Option<String>,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_mobile: Option<String>,
    pub password: String,
    pub password_confirm: String,
    pub stars: u8,
    pub facility_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub government_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    pub id: i64,
    pub hotel_name: String,
    pub email: String,
    #[serde(default, rename = "twoFAEnabled")]
    pub two_fa_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub hotel: HotelSummary,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub requires_otp: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cooldown_seconds: Option<u64>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub hotel: Option<HotelSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

pub type VerifyForgotPasswordOtpRequest = VerifyOtpRequest;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRegistrationOtpRequest {
    pub email: String,
    pub otp: String,
    pub hotel_name: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_email: Option<String>,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_mobile: Option<String>,
    pub password: String,
    pub stars: u8,
    pub facility_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub government_id: Option<i64>,
}

impl VerifyRegistrationOtpRequest {
    // The registration is replayed in full together with the code that was mailed.
    pub fn from_registration(registration: &RegisterRequest, otp: impl Into<String>) -> Self {
        Self {
            email: registration.email.clone(),
            otp: otp.into(),
            hotel_name: registration.hotel_name.clone(),
            description: registration.description.clone(),
            location: registration.location.clone(),
            additional_email: registration.additional_email.clone(),
            mobile: registration.mobile.clone(),
            additional_mobile: registration.additional_mobile.clone(),
            password: registration.password.clone(),
            stars: registration.stars,
            facility_ids: registration.facility_ids.clone(),
            country_id: registration.country_id,
            government_id: registration.government_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ---- Lookups ----

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Facility {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub img: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Country {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub img: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Government {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct FacilitiesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub facilities: Vec<Facility>,
}

#[derive(Debug, Deserialize)]
pub struct CountriesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
pub struct GovernmentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub governments: Vec<Government>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub room_types: Vec<RoomType>,
}

// ---- Rooms ----

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceIncreaseRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub range: DateRange,
    // Percentage, 0-1000.
    #[serde(rename = "IncreaseValue", alias = "increaseValue")]
    pub increase_value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceDecreaseRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub range: DateRange,
    // Percentage, 0-100.
    #[serde(rename = "DecreaseValue", alias = "decreaseValue")]
    pub decrease_value: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExcludedDateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub range: DateRange,
}

impl PriceIncreaseRange {
    pub fn new(range: DateRange, increase_value: f64) -> Self {
        Self {
            id: None,
            range,
            increase_value,
        }
    }
}

impl PriceDecreaseRange {
    pub fn new(range: DateRange, decrease_value: f64) -> Self {
        Self {
            id: None,
            range,
            decrease_value,
        }
    }
}

impl From<DateRange> for ExcludedDateRange {
    fn from(range: DateRange) -> Self {
        Self { id: None, range }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub room_name: String,
    pub room_type: i64,
    pub beds_count: u32,
    pub sqft: f64,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub facilities: Vec<i64>,
    #[serde(default)]
    pub feature_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub number_of_rooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub price_increase_ranges: Vec<PriceIncreaseRange>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub price_decrease_ranges: Vec<PriceDecreaseRange>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub excluded_date_ranges: Vec<ExcludedDateRange>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RoomsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<Room>,
}

#[derive(Debug, Deserialize)]
pub struct RoomResponse {
    pub room: Room,
}

// An image attached to a room form.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRoomRequest {
    pub room_name: String,
    pub room_type: i64,
    pub beds_count: u32,
    pub sqft: u32,
    pub price: f64,
    pub facilities: Vec<i64>,
    pub feature_image: Option<ImageUpload>,
    pub gallery_images: Vec<ImageUpload>,
    pub number_of_rooms: u32,
    pub price_increase_ranges: Vec<PriceIncreaseRange>,
    pub price_decrease_ranges: Vec<PriceDecreaseRange>,
    pub excluded_date_ranges: Vec<ExcludedDateRange>,
}

// Partial room update: every `None` or empty field is left untouched on the server.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateRoomRequest {
    pub room_name: Option<String>,
    pub room_type: Option<i64>,
    pub beds_count: Option<u32>,
    pub sqft: Option<u32>,
    pub price: Option<f64>,
    pub facilities: Vec<i64>,
    pub feature_image: Option<ImageUpload>,
    pub gallery_images: Vec<ImageUpload>,
    pub price_increase_ranges: Vec<PriceIncreaseRange>,
    pub price_decrease_ranges: Vec<PriceDecreaseRange>,
    pub excluded_date_ranges: Vec<ExcludedDateRange>,
}

// ---- Bookings ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookingStatus {
    Booked,
    #[serde(rename = "Check_in")]
    CheckIn,
    Completed,
    Cancelled,
    Confirmed,
    Excluded,
}

impl BookingStatus {
    // Only freshly booked reservations wait for the hotel's decision.
    pub fn awaits_decision(&self) -> bool {
        matches!(self, BookingStatus::Booked)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub prop_id: i64,
    pub uid: i64,
    pub book_date: String,
    pub check_in: String,
    pub check_out: String,
    pub subtotal: f64,
    pub total: f64,
    pub tax: f64,
    pub book_status: BookingStatus,
    #[serde(default)]
    pub prop_title: String,
    #[serde(default)]
    pub confirmed_at: Option<String>,
    #[serde(default)]
    pub confirmed_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEnumValuesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub enum_values: Vec<BookingStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

// ---- Payout ----

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutProfile {
    pub id: i64,
    pub uid: i64,
    pub name: String,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub bank_account_number: Option<String>,
    pub full_name: String,
    #[serde(default)]
    pub wallet_number: Option<String>,
    pub status: i64,
    pub method_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutProfilesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payout_profiles: Vec<PayoutProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutProfileResponse {
    pub payout_profile: PayoutProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayoutProfileRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_number: Option<String>,
    pub method_id: i64,
    pub status: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayoutProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayoutRequest {
    pub book_ids: Vec<i64>,
    pub profile_id: i64,
}

// ---- Profile ----

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub hotel_name: String,
    pub email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub additional_email: Option<String>,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub additional_mobile: Option<String>,
    #[serde(default)]
    pub nearest_airport_name: Option<String>,
    #[serde(default)]
    pub nearest_airport_km: Option<f64>,
    #[serde(default)]
    pub stars: Option<u8>,
    #[serde(default, rename = "twoFAEnabled")]
    pub two_fa_enabled: bool,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub facility_ids: Vec<i64>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub government_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_airport_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_airport_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    #[serde(rename = "twoFAEnabled", skip_serializing_if = "Option::is_none")]
    pub two_fa_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub government_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEmailInitiateRequest {
    pub new_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailChangeRequest {
    pub new_email: String,
    pub otp: String,
}

// ---- Reviews and statistics ----

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub rating: f64,
    #[serde(default)]
    pub comment: String,
    pub room_id: i64,
    #[serde(default)]
    pub room_name: String,
    pub user_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    pub created_at: String,
    pub status: i64,
    pub book_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsData {
    pub total_pending_booking: u64,
    pub total_confirmed_booking: u64,
    pub total_rooms: u64,
    pub total_availables_rooms: u64,
    pub total_money: f64,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsResponse {
    pub statistics: StatisticsData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_accepts_camel_case_ranges_and_nulls() {
        let json = r#"{
            "id": 7,
            "roomName": "Sea View Double",
            "roomType": 2,
            "bedsCount": 2,
            "sqft": 320,
            "price": 95.5,
            "facilities": [1, 4],
            "featureImage": "/uploads/7.jpg",
            "galleryImages": null,
            "priceIncreaseRanges": [
                {"id": 11, "startDate": "2024-07-01", "endDate": "2024-07-10", "increaseValue": 25}
            ],
            "priceDecreaseRanges": null,
            "excludedDateRanges": [
                {"id": 3, "StartDate": "2024-12-24", "EndDate": "2024-12-26"}
            ],
            "averageRating": null,
            "reviewCount": 4
        }"#;

        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.room_name, "Sea View Double");
        assert!(room.gallery_images.is_empty());
        assert!(room.price_decrease_ranges.is_empty());
        assert_eq!(room.price_increase_ranges.len(), 1);

        let increase = &room.price_increase_ranges[0];
        assert_eq!(increase.id, Some(11));
        assert_eq!(increase.increase_value, 25.0);
        assert_eq!(increase.range.start().to_string(), "2024-07-01");
        assert_eq!(room.excluded_date_ranges[0].range.len_days(), 3);
    }

    #[test]
    fn test_room_drops_only_malformed_range_entries() {
        let json = serde_json::json!({
            "id": 8,
            "roomName": "Garden Suite",
            "roomType": 3,
            "bedsCount": 2,
            "sqft": 450,
            "price": 120,
            "facilities": [],
            "featureImage": "/uploads/8.jpg",
            "galleryImages": [],
            "priceIncreaseRanges": [
                {"startDate": "2024-08-01", "endDate": null, "increaseValue": 10},
                {"id": 2, "startDate": "2024-08-05", "endDate": "2024-08-07", "increaseValue": 30}
            ],
            "priceDecreaseRanges": [
                {"id": 4, "startDate": "2024-09-10", "endDate": "2024-09-01", "decreaseValue": 5},
                {"id": 5, "startDate": "2024-09-10", "endDate": "2024-09-12"}
            ],
            "excludedDateRanges": [
                {"id": 6, "endDate": "2024-12-26"},
                {"id": 7, "startDate": "2024-12-30", "endDate": "2024-12-31"}
            ]
        });

        let room: Room = serde_json::from_value(json).unwrap();
        assert_eq!(room.price_increase_ranges.len(), 1);
        assert_eq!(room.price_increase_ranges[0].id, Some(2));
        assert!(room.price_decrease_ranges.is_empty());
        assert_eq!(room.excluded_date_ranges.len(), 1);
        assert_eq!(room.excluded_date_ranges[0].id, Some(7));
    }

    #[test]
    fn test_range_payload_serializes_pascal_case() {
        let range = DateRange::parse("2024-03-10", "2024-03-12").unwrap();
        let json = serde_json::to_value(PriceDecreaseRange::new(range, 15.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "StartDate": "2024-03-10",
                "EndDate": "2024-03-12",
                "DecreaseValue": 15.0
            })
        );
    }

    #[test]
    fn test_booking_status_wire_names() {
        let json = r#"{
            "id": 1, "propId": 7, "uid": 42,
            "bookDate": "2024-03-01", "checkIn": "2024-03-10", "checkOut": "2024-03-12",
            "subtotal": 180, "total": 198, "tax": 18,
            "bookStatus": "Check_in", "propTitle": "Sea View Double",
            "confirmedAt": null, "confirmedBy": null
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.book_status, BookingStatus::CheckIn);
        assert!(!booking.book_status.awaits_decision());
        assert_eq!(
            serde_json::to_string(&BookingStatus::CheckIn).unwrap(),
            "\"Check_in\""
        );
    }

    #[test]
    fn test_registration_otp_replays_registration() {
        let registration = RegisterRequest {
            hotel_name: "Nile Palace".to_string(),
            email: "front@nile.example".to_string(),
            password: "Secret#123".to_string(),
            password_confirm: "Secret#123".to_string(),
            stars: 4,
            facility_ids: vec![1, 2],
            ..Default::default()
        };

        let request = VerifyRegistrationOtpRequest::from_registration(&registration, "123456");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["otp"], "123456");
        assert_eq!(json["hotelName"], "Nile Palace");
        assert!(json.get("passwordConfirm").is_none());
        assert!(json.get("countryId").is_none());
    }

    #[test]
    fn test_login_response_with_otp_challenge() {
        let json = r#"{"requiresOtp": true, "email": "front@nile.example", "cooldownSeconds": 60}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(response.requires_otp);
        assert_eq!(response.cooldown_seconds, Some(60));
        assert!(response.access_token.is_none());
    }
}
