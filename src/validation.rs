// Client-side validation of the dashboard forms.
// Errors are keyed by the same field names the API uses so they can be merged
// with server-side field errors.

use crate::models::{
    ChangeEmailInitiateRequest, CreateRoomRequest, ForgotPasswordRequest, LoginRequest,
    PriceDecreaseRange, PriceIncreaseRange, RegisterRequest, ResetPasswordRequest,
    UpdateProfileRequest, UpdateRoomRequest, VerifyEmailChangeRequest, VerifyOtpRequest,
    VerifyRegistrationOtpRequest,
};
use crate::response::FieldErrors;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

pub const MAX_INCREASE_PERCENT: f64 = 1000.0;
pub const MAX_DECREASE_PERCENT: f64 = 100.0;

const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

// Hotel location must be a Google Maps link
static GOOGLE_MAPS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(www\.)?(maps\.google\.com|google\.com/maps|goo\.gl/maps|maps\.app\.goo\.gl)/.+",
    )
    .expect("Invalid regex")
});

#[derive(Error, Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(pub FieldErrors);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first() {
            Some((field, message)) => write!(f, "{}: {}", field, message),
            None => write!(f, "validation failed"),
        }
    }
}

impl ValidationErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .find_map(|(field, msgs)| msgs.first().map(|m| (field.as_str(), m.as_str())))
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_email(&mut errors, "email", &request.email);
    check_password(&mut errors, "password", &request.password);

    errors.into_result()
}

pub fn check_password(errors: &mut ValidationErrors, field: &str, password: &str) {
    if password.chars().count() < 8 {
        errors.add(field, "Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.add(field, "Password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.add(field, "Password must contain a number");
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        errors.add(field, "Password must contain a symbol");
    }
}

pub fn validate_otp(otp: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_otp(&mut errors, otp);
    errors.into_result()
}

fn check_otp(errors: &mut ValidationErrors, otp: &str) {
    if otp.len() != 6 {
        errors.add("otp", "OTP must be 6 digits");
    } else if !otp.bytes().all(|b| b.is_ascii_digit()) {
        errors.add("otp", "OTP must contain numbers only");
    }
}

fn check_email(errors: &mut ValidationErrors, field: &str, email: &str) {
    if !is_valid_email(email) {
        errors.add(field, "Invalid email address");
    }
}

// Optional contact fields accept an empty string as "not given".
fn check_optional_email(errors: &mut ValidationErrors, field: &str, email: Option<&str>) {
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        check_email(errors, field, email);
    }
}

fn check_confirmation(errors: &mut ValidationErrors, field: &str, password: &str, confirm: &str) {
    if confirm.chars().count() < 8 {
        errors.add(field, "Password confirmation is required");
    } else if password != confirm {
        errors.add(field, "Passwords do not match");
    }
}

fn check_stars(errors: &mut ValidationErrors, stars: u8) {
    if !(1..=5).contains(&stars) {
        errors.add("stars", "Stars must be between 1 and 5");
    }
}

fn check_max_len(errors: &mut ValidationErrors, field: &str, value: Option<&str>, max: usize) {
    if value.map_or(false, |v| v.chars().count() > max) {
        errors.add(field, format!("Must be at most {} characters", max));
    }
}

pub fn is_google_maps_url(url: &str) -> bool {
    GOOGLE_MAPS_URL.is_match(url)
}

// Hotel details shared by registration and its OTP confirmation.
struct HotelDetails<'a> {
    hotel_name: &'a str,
    description: &'a str,
    location: &'a str,
    email: &'a str,
    additional_email: Option<&'a str>,
    mobile: &'a str,
    additional_mobile: Option<&'a str>,
    password: &'a str,
    stars: u8,
    facility_count: usize,
}

fn check_hotel_details(errors: &mut ValidationErrors, hotel: HotelDetails<'_>) {
    if hotel.hotel_name.chars().count() < 2 {
        errors.add("hotelName", "Hotel name must be at least 2 characters");
    }
    if hotel.description.chars().count() < 10 {
        errors.add("description", "Description must be at least 10 characters");
    }
    if hotel.location.is_empty() {
        errors.add("location", "Location is required");
    } else if !is_google_maps_url(hotel.location) {
        errors.add("location", "Please enter a valid Google Maps URL");
    }
    check_email(errors, "email", hotel.email);
    check_optional_email(errors, "additionalEmail", hotel.additional_email);
    if hotel.mobile.chars().count() < 10 {
        errors.add("mobile", "Mobile number must be at least 10 characters");
    }
    if let Some(mobile) = hotel.additional_mobile.filter(|m| !m.is_empty()) {
        if mobile.chars().count() < 10 {
            errors.add("additionalMobile", "Mobile number must be at least 10 characters");
        }
    }
    check_password(errors, "password", hotel.password);
    check_stars(errors, hotel.stars);
    if hotel.facility_count == 0 {
        errors.add("facilityIds", "Please select at least one facility");
    }
}

pub fn validate_register(request: &RegisterRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_hotel_details(
        &mut errors,
        HotelDetails {
            hotel_name: &request.hotel_name,
            description: &request.description,
            location: &request.location,
            email: &request.email,
            additional_email: request.additional_email.as_deref(),
            mobile: &request.mobile,
            additional_mobile: request.additional_mobile.as_deref(),
            password: &request.password,
            stars: request.stars,
            facility_count: request.facility_ids.len(),
        },
    );
    check_confirmation(
        &mut errors,
        "passwordConfirm",
        &request.password,
        &request.password_confirm,
    );
    errors.into_result()
}

pub fn validate_verify_registration_otp(
    request: &VerifyRegistrationOtpRequest,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_otp(&mut errors, &request.otp);
    check_hotel_details(
        &mut errors,
        HotelDetails {
            hotel_name: &request.hotel_name,
            description: &request.description,
            location: &request.location,
            email: &request.email,
            additional_email: request.additional_email.as_deref(),
            mobile: &request.mobile,
            additional_mobile: request.additional_mobile.as_deref(),
            password: &request.password,
            stars: request.stars,
            facility_count: request.facility_ids.len(),
        },
    );
    errors.into_result()
}

// Login OTP and forgot-password OTP share the same shape.
pub fn validate_verify_otp(request: &VerifyOtpRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_email(&mut errors, "email", &request.email);
    check_otp(&mut errors, &request.otp);
    errors.into_result()
}

pub fn validate_forgot_password(request: &ForgotPasswordRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_email(&mut errors, "email", &request.email);
    errors.into_result()
}

pub fn validate_reset_password(request: &ResetPasswordRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_email(&mut errors, "email", &request.email);
    check_otp(&mut errors, &request.otp);
    check_password(&mut errors, "newPassword", &request.new_password);
    check_confirmation(
        &mut errors,
        "confirmPassword",
        &request.new_password,
        &request.confirm_password,
    );
    errors.into_result()
}

pub fn validate_update_profile(request: &UpdateProfileRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if request.hotel_name.as_deref() == Some("") {
        errors.add("hotelName", "Hotel name is required");
    }
    check_max_len(&mut errors, "hotelName", request.hotel_name.as_deref(), 500);
    check_max_len(&mut errors, "description", request.description.as_deref(), 2000);
    check_max_len(&mut errors, "location", request.location.as_deref(), 500);
    check_optional_email(&mut errors, "additionalEmail", request.additional_email.as_deref());
    if request.mobile.as_deref() == Some("") {
        errors.add("mobile", "Mobile is required");
    }
    check_max_len(&mut errors, "mobile", request.mobile.as_deref(), 20);
    check_max_len(&mut errors, "additionalMobile", request.additional_mobile.as_deref(), 20);
    if let Some(stars) = request.stars {
        check_stars(&mut errors, stars);
    }

    errors.into_result()
}

fn check_new_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.add("newEmail", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("newEmail", "Invalid email format");
    }
}

pub fn validate_change_email(request: &ChangeEmailInitiateRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_new_email(&mut errors, &request.new_email);
    errors.into_result()
}

pub fn validate_verify_email_change(
    request: &VerifyEmailChangeRequest,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_new_email(&mut errors, &request.new_email);
    if request.otp.chars().count() != 6 {
        errors.add("otp", "OTP must be 6 digits");
    }
    errors.into_result()
}

pub fn validate_create_room(request: &CreateRoomRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_room_name(&mut errors, &request.room_name);
    if request.room_type <= 0 {
        errors.add("RoomType", "Room type is required");
    }
    check_beds(&mut errors, request.beds_count);
    check_sqft(&mut errors, request.sqft);
    check_price(&mut errors, request.price);
    if request.facilities.is_empty() {
        errors.add("Facilities", "At least one facility is required");
    }
    match &request.feature_image {
        Some(image) if !image.bytes.is_empty() => {}
        _ => errors.add("FeatureImage", "Feature image is required"),
    }
    if request.number_of_rooms < 1 {
        errors.add("NumberOfRooms", "Number of rooms must be at least 1");
    }
    check_ranges(
        &mut errors,
        &request.price_increase_ranges,
        &request.price_decrease_ranges,
    );

    errors.into_result()
}

pub fn validate_update_room(request: &UpdateRoomRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Some(name) = &request.room_name {
        check_room_name(&mut errors, name);
    }
    if matches!(request.room_type, Some(t) if t <= 0) {
        errors.add("RoomType", "Room type is required");
    }
    if let Some(beds) = request.beds_count {
        check_beds(&mut errors, beds);
    }
    if let Some(sqft) = request.sqft {
        check_sqft(&mut errors, sqft);
    }
    if let Some(price) = request.price {
        check_price(&mut errors, price);
    }
    check_ranges(
        &mut errors,
        &request.price_increase_ranges,
        &request.price_decrease_ranges,
    );

    errors.into_result()
}

fn check_room_name(errors: &mut ValidationErrors, name: &str) {
    let len = name.trim().chars().count();
    if len == 0 {
        errors.add("RoomName", "Room name is required");
    } else if len > 500 {
        errors.add("RoomName", "Room name must be 1-500 characters");
    }
}

fn check_beds(errors: &mut ValidationErrors, beds: u32) {
    if !(1..=100).contains(&beds) {
        errors.add("BedsCount", "Beds count must be between 1 and 100");
    }
}

fn check_sqft(errors: &mut ValidationErrors, sqft: u32) {
    if !(5..=10_000).contains(&sqft) {
        errors.add("Sqft", "Square footage must be between 5 and 10000");
    }
}

fn check_price(errors: &mut ValidationErrors, price: f64) {
    if !(1.0..=1_000_000.0).contains(&price) {
        errors.add("Price", "Price must be between 1 and 1,000,000");
    }
}

pub fn check_increase_value(value: f64) -> Option<&'static str> {
    (!(0.0..=MAX_INCREASE_PERCENT).contains(&value))
        .then_some("Increase value must be between 0 and 1000 percent")
}

pub fn check_decrease_value(value: f64) -> Option<&'static str> {
    (!(0.0..=MAX_DECREASE_PERCENT).contains(&value))
        .then_some("Decrease value must be between 0 and 100 percent")
}

// Range bounds are already ordered by `DateRange`; only the percentages remain.
fn check_ranges(
    errors: &mut ValidationErrors,
    increases: &[PriceIncreaseRange],
    decreases: &[PriceDecreaseRange],
) {
    for (i, range) in increases.iter().enumerate() {
        if let Some(msg) = check_increase_value(range.increase_value) {
            errors.add(format!("PriceIncreaseRanges[{}].IncreaseValue", i), msg);
        }
    }
    for (i, range) in decreases.iter().enumerate() {
        if let Some(msg) = check_decrease_value(range.decrease_value) {
            errors.add(format!("PriceDecreaseRanges[{}].DecreaseValue", i), msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_ranges::DateRange;
    use crate::models::ImageUpload;
    use test_case::test_case;

    fn valid_room() -> CreateRoomRequest {
        CreateRoomRequest {
            room_name: "Garden Suite".to_string(),
            room_type: 3,
            beds_count: 2,
            sqft: 450,
            price: 120.0,
            facilities: vec![1, 5],
            feature_image: Some(ImageUpload::new("suite.jpg", "image/jpeg", vec![0xFF, 0xD8])),
            gallery_images: vec![],
            number_of_rooms: 4,
            price_increase_ranges: vec![],
            price_decrease_ranges: vec![],
            excluded_date_ranges: vec![],
        }
    }

    #[test]
    fn test_valid_room_passes() {
        assert!(validate_create_room(&valid_room()).is_ok());
    }

    #[test]
    fn test_room_collects_every_failing_field() {
        let mut room = valid_room();
        room.room_name = "   ".to_string();
        room.beds_count = 0;
        room.sqft = 2;
        room.price = 0.5;
        room.facilities.clear();
        room.feature_image = None;
        room.number_of_rooms = 0;

        let errors = validate_create_room(&room).unwrap_err();
        for field in [
            "RoomName",
            "BedsCount",
            "Sqft",
            "Price",
            "Facilities",
            "FeatureImage",
            "NumberOfRooms",
        ] {
            assert!(errors.get(field).is_some(), "missing error for {}", field);
        }
    }

    #[test]
    fn test_range_percentages_are_bounded() {
        let range = DateRange::parse("2024-06-01", "2024-06-03").unwrap();
        let update = UpdateRoomRequest {
            price_increase_ranges: vec![PriceIncreaseRange::new(range, 1200.0)],
            price_decrease_ranges: vec![
                PriceDecreaseRange::new(range, 50.0),
                PriceDecreaseRange::new(range, 101.0),
            ],
            ..Default::default()
        };

        let errors = validate_update_room(&update).unwrap_err();
        assert!(errors.get("PriceIncreaseRanges[0].IncreaseValue").is_some());
        assert!(errors.get("PriceDecreaseRanges[0].DecreaseValue").is_none());
        assert!(errors.get("PriceDecreaseRanges[1].DecreaseValue").is_some());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(validate_update_room(&UpdateRoomRequest::default()).is_ok());
    }

    #[test_case("front@hotel.example", true)]
    #[test_case("front@hotel", false)]
    #[test_case("@hotel.example", false)]
    #[test_case("front desk@hotel.example", false)]
    #[test_case("front@@hotel.example", false)]
    fn test_email_shape(email: &str, expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[test_case("Secret#123", 0; "strong")]
    #[test_case("secret#123", 1; "no uppercase")]
    #[test_case("Secret#abc", 1; "no digit")]
    #[test_case("Secret1234", 1; "no symbol")]
    #[test_case("S#1", 1; "too short")]
    fn test_password_rules(password: &str, expected_errors: usize) {
        let request = LoginRequest {
            email: "front@hotel.example".to_string(),
            password: password.to_string(),
        };
        let count = match validate_login(&request) {
            Ok(()) => 0,
            Err(errors) => errors.get("password").map_or(0, |m| m.len()),
        };
        assert_eq!(count, expected_errors);
    }

    #[test_case("123456", true)]
    #[test_case("12345", false)]
    #[test_case("12a456", false)]
    fn test_otp(otp: &str, ok: bool) {
        assert_eq!(validate_otp(otp).is_ok(), ok);
    }

    fn registration() -> RegisterRequest {
        RegisterRequest {
            hotel_name: "Nile View".to_string(),
            description: "Quiet rooms on the river bank".to_string(),
            location: "https://maps.google.com/?q=nile+view".to_string(),
            email: "front@nile.example".to_string(),
            additional_email: Some(String::new()),
            mobile: "+201001234567".to_string(),
            additional_mobile: None,
            password: "Secret#123".to_string(),
            password_confirm: "Secret#123".to_string(),
            stars: 4,
            facility_ids: vec![1, 2],
            country_id: None,
            government_id: None,
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(validate_register(&registration()).is_ok());
    }

    #[test_case(|r: &mut RegisterRequest| { r.password_confirm = "Secret#124".into(); }, "passwordConfirm"; "password mismatch")]
    #[test_case(|r: &mut RegisterRequest| { r.password_confirm = "short".into(); }, "passwordConfirm"; "confirmation too short")]
    #[test_case(|r: &mut RegisterRequest| { r.location = "https://www.openstreetmap.org/#map=12/30/31".into(); }, "location"; "not a maps url")]
    #[test_case(|r: &mut RegisterRequest| { r.location = String::new(); }, "location"; "missing location")]
    #[test_case(|r: &mut RegisterRequest| { r.hotel_name = "N".into(); }, "hotelName"; "short hotel name")]
    #[test_case(|r: &mut RegisterRequest| { r.description = "Nice".into(); }, "description"; "short description")]
    #[test_case(|r: &mut RegisterRequest| { r.additional_email = Some("desk@".into()); }, "additionalEmail"; "bad additional email")]
    #[test_case(|r: &mut RegisterRequest| { r.mobile = "12345".into(); }, "mobile"; "short mobile")]
    #[test_case(|r: &mut RegisterRequest| { r.additional_mobile = Some("123".into()); }, "additionalMobile"; "short additional mobile")]
    #[test_case(|r: &mut RegisterRequest| { r.stars = 6; }, "stars"; "too many stars")]
    #[test_case(|r: &mut RegisterRequest| { r.facility_ids.clear(); }, "facilityIds"; "no facilities")]
    fn test_registration_rejects(edit: fn(&mut RegisterRequest), field: &str) {
        let mut request = registration();
        edit(&mut request);
        let errors = validate_register(&request).unwrap_err();
        assert!(errors.get(field).is_some(), "missing error for {}", field);
    }

    #[test]
    fn test_password_mismatch_message() {
        let mut request = registration();
        request.password_confirm = "Secret#999".to_string();
        let errors = validate_register(&request).unwrap_err();
        assert_eq!(
            errors.get("passwordConfirm"),
            Some(&["Passwords do not match".to_string()][..])
        );
    }

    #[test_case("https://maps.google.com/?q=cairo", true)]
    #[test_case("http://www.google.com/maps/place/Cairo", true)]
    #[test_case("https://goo.gl/maps/abc123", true)]
    #[test_case("https://maps.app.goo.gl/xyz", true)]
    #[test_case("HTTPS://MAPS.GOOGLE.COM/?q=cairo", true)]
    #[test_case("https://maps.google.com/", false; "nothing after the host")]
    #[test_case("https://bing.com/maps/cairo", false)]
    #[test_case("maps.google.com/?q=cairo", false; "no scheme")]
    fn test_google_maps_url(url: &str, expected: bool) {
        assert_eq!(is_google_maps_url(url), expected);
    }

    #[test]
    fn test_registration_otp_checks_code_and_details() {
        let mut request = VerifyRegistrationOtpRequest::from_registration(&registration(), "12ab56");
        request.location = "somewhere".to_string();
        let errors = validate_verify_registration_otp(&request).unwrap_err();
        assert!(errors.get("otp").is_some());
        assert!(errors.get("location").is_some());

        let request = VerifyRegistrationOtpRequest::from_registration(&registration(), "123456");
        assert!(validate_verify_registration_otp(&request).is_ok());
    }

    #[test_case("front@nile.example", "123456", &[]; "valid")]
    #[test_case("front@nile", "123456", &["email"]; "bad email")]
    #[test_case("front@nile.example", "1234", &["otp"]; "short otp")]
    #[test_case("nope", "abcdef", &["email", "otp"]; "both")]
    fn test_verify_otp(email: &str, otp: &str, fields: &[&str]) {
        let request = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        match validate_verify_otp(&request) {
            Ok(()) => assert!(fields.is_empty()),
            Err(errors) => {
                for field in fields {
                    assert!(errors.get(field).is_some(), "missing error for {}", field);
                }
                assert_eq!(errors.0.len(), fields.len());
            }
        }
    }

    #[test]
    fn test_forgot_password_needs_email() {
        let request = ForgotPasswordRequest {
            email: "front".to_string(),
        };
        assert!(validate_forgot_password(&request).is_err());
    }

    #[test_case("Secret#123", "Secret#123", None; "matching")]
    #[test_case("Secret#123", "Secret#321", Some("Passwords do not match"); "mismatch")]
    #[test_case("Secret#123", "", Some("Password confirmation is required"); "missing confirmation")]
    fn test_reset_password_confirmation(new_password: &str, confirm: &str, expected: Option<&str>) {
        let request = ResetPasswordRequest {
            email: "front@nile.example".to_string(),
            otp: "123456".to_string(),
            new_password: new_password.to_string(),
            confirm_password: confirm.to_string(),
        };
        let message = validate_reset_password(&request)
            .err()
            .and_then(|errors| errors.get("confirmPassword").map(|m| m[0].clone()));
        assert_eq!(message.as_deref(), expected);
    }

    #[test]
    fn test_reset_password_checks_new_password_rules() {
        let request = ResetPasswordRequest {
            email: "front@nile.example".to_string(),
            otp: "123456".to_string(),
            new_password: "weakpass".to_string(),
            confirm_password: "weakpass".to_string(),
        };
        let errors = validate_reset_password(&request).unwrap_err();
        assert!(errors.get("newPassword").is_some());
        assert!(errors.get("confirmPassword").is_none());
    }

    #[test_case(UpdateProfileRequest::default(), None; "nothing to change")]
    #[test_case(UpdateProfileRequest { hotel_name: Some(String::new()), ..Default::default() }, Some("hotelName"); "blank hotel name")]
    #[test_case(UpdateProfileRequest { hotel_name: Some("x".repeat(501)), ..Default::default() }, Some("hotelName"); "long hotel name")]
    #[test_case(UpdateProfileRequest { description: Some("x".repeat(2001)), ..Default::default() }, Some("description"); "long description")]
    #[test_case(UpdateProfileRequest { additional_email: Some("desk@".into()), ..Default::default() }, Some("additionalEmail"); "bad additional email")]
    #[test_case(UpdateProfileRequest { additional_email: Some(String::new()), ..Default::default() }, None; "cleared additional email")]
    #[test_case(UpdateProfileRequest { mobile: Some("0".repeat(21)), ..Default::default() }, Some("mobile"); "long mobile")]
    #[test_case(UpdateProfileRequest { stars: Some(0), ..Default::default() }, Some("stars"); "zero stars")]
    fn test_update_profile(request: UpdateProfileRequest, field: Option<&str>) {
        match (validate_update_profile(&request), field) {
            (Ok(()), None) => {}
            (Err(errors), Some(field)) => {
                assert!(errors.get(field).is_some(), "missing error for {}", field)
            }
            (result, field) => panic!("unexpected {:?} for {:?}", result, field),
        }
    }

    #[test_case("new@nile.example", Ok(()); "valid")]
    #[test_case("", Err("Email is required"); "empty")]
    #[test_case("new@nile", Err("Invalid email format"); "malformed")]
    fn test_change_email(new_email: &str, expected: Result<(), &str>) {
        let request = ChangeEmailInitiateRequest {
            new_email: new_email.to_string(),
        };
        let result = validate_change_email(&request)
            .map_err(|errors| errors.get("newEmail").map(|m| m[0].clone()).unwrap_or_default());
        assert_eq!(result, expected.map_err(str::to_string));
    }

    #[test_case("new@nile.example", "123456", true)]
    #[test_case("new@nile.example", "12345", false)]
    #[test_case("new@", "123456", false)]
    fn test_verify_email_change(new_email: &str, otp: &str, ok: bool) {
        let request = VerifyEmailChangeRequest {
            new_email: new_email.to_string(),
            otp: otp.to_string(),
        };
        assert_eq!(validate_verify_email_change(&request).is_ok(), ok);
    }
}
