// Typed endpoints of the hotel partner API, grouped the way the dashboard uses them.

use crate::calendar::{exclusion_update, DaySelection, PriceAdjustment};
use crate::client::{ApiError, ApiRequest, HotelApiClient};
use crate::models::*;
use crate::room_form::RoomForm;
use crate::session::TokenPair;
use crate::validation::{
    validate_change_email, validate_create_room, validate_forgot_password, validate_login,
    validate_register, validate_reset_password, validate_update_profile, validate_update_room,
    validate_verify_email_change, validate_verify_otp, validate_verify_registration_otp,
};
use serde_json::Value;
use tracing::{debug, info};

impl HotelApiClient {
    // Endpoints that only confirm an action answer with `{message}` inside
    // `data`, or with no data at all.
    async fn send_for_message(&self, request: ApiRequest) -> Result<MessageResponse, ApiError> {
        let response = self.execute::<Value>(request).await?;
        let mut message = serde_json::from_value::<MessageResponse>(response.data).unwrap_or(
            MessageResponse {
                message: String::new(),
                cooldown_seconds: None,
            },
        );
        if message.message.is_empty() {
            message.message = response.message;
        }
        Ok(message)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        Ok(self.execute::<T>(request).await?.data)
    }

    // ---- Auth ----

    // Signs in. Tokens are kept only when no OTP step follows.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        validate_login(request)?;
        let response: LoginResponse = self
            .fetch(ApiRequest::post("auth/login").json(request)?)
            .await?;

        if !response.requires_otp {
            if let (Some(access), Some(refresh)) = (&response.access_token, &response.refresh_token) {
                self.token_store()
                    .set_tokens(TokenPair::new(access.clone(), refresh.clone()))
                    .await;
                info!(email = %request.email, "logged in");
            }
        } else {
            debug!(email = %request.email, "login requires otp");
        }
        Ok(response)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        validate_register(request)?;
        self.send_for_message(ApiRequest::post("auth/register").json(request)?)
            .await
    }

    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<AuthResponse, ApiError> {
        validate_verify_otp(request)?;
        let response: AuthResponse = self
            .fetch(ApiRequest::post("auth/verify-otp").json(request)?)
            .await?;
        self.store_session(&response).await;
        Ok(response)
    }

    pub async fn verify_registration_otp(
        &self,
        request: &VerifyRegistrationOtpRequest,
    ) -> Result<AuthResponse, ApiError> {
        validate_verify_registration_otp(request)?;
        let response: AuthResponse = self
            .fetch(ApiRequest::post("auth/verify-registration-otp").json(request)?)
            .await?;
        self.store_session(&response).await;
        Ok(response)
    }

    async fn store_session(&self, response: &AuthResponse) {
        self.token_store()
            .set_tokens(TokenPair::new(
                response.access_token.clone(),
                response.refresh_token.clone(),
            ))
            .await;
        info!(hotel_id = response.hotel.id, "session established");
    }

    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        validate_forgot_password(request)?;
        self.send_for_message(ApiRequest::post("forgotpassword/forgot-password").json(request)?)
            .await
    }

    pub async fn verify_forgot_password_otp(
        &self,
        request: &VerifyForgotPasswordOtpRequest,
    ) -> Result<MessageResponse, ApiError> {
        validate_verify_otp(request)?;
        self.send_for_message(
            ApiRequest::post("forgotpassword/verify-forgot-password-otp").json(request)?,
        )
        .await
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        validate_reset_password(request)?;
        self.send_for_message(ApiRequest::post("forgotpassword/reset-password").json(request)?)
            .await
    }

    // Exchanges the stored refresh token for a new pair.
    pub async fn refresh_token(&self) -> Result<TokenPair, ApiError> {
        let refresh_token = self
            .token_store()
            .refresh_token()
            .await
            .ok_or(ApiError::Unauthorized)?;
        let tokens: TokenPair = self
            .fetch(ApiRequest::post("auth/refresh-token").json(&RefreshTokenRequest { refresh_token })?)
            .await?;
        self.token_store().set_tokens(tokens.clone()).await;
        Ok(tokens)
    }

    // The API has no logout call; the session lives only in the token store.
    pub async fn logout(&self) {
        self.token_store().clear().await;
        info!("logged out");
    }

    // ---- Bookings ----

    pub async fn bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let response: BookingsResponse = self.fetch(ApiRequest::get("bookings")).await?;
        Ok(response.bookings)
    }

    pub async fn booking_statuses(&self) -> Result<Vec<BookingStatus>, ApiError> {
        let response: BookingEnumValuesResponse =
            self.fetch(ApiRequest::get("bookings/enum-values")).await?;
        Ok(response.enum_values)
    }

    pub async fn approve_booking(&self, booking_id: i64) -> Result<MessageResponse, ApiError> {
        self.send_for_message(ApiRequest::put(format!("bookings/{}/approve", booking_id)))
            .await
    }

    pub async fn reject_booking(
        &self,
        booking_id: i64,
        cancel_reason: Option<String>,
    ) -> Result<MessageResponse, ApiError> {
        let body = RejectBookingRequest { cancel_reason };
        self.send_for_message(ApiRequest::put(format!("bookings/{}/reject", booking_id)).json(&body)?)
            .await
    }

    // ---- Rooms ----

    pub async fn my_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let response: RoomsResponse = self.fetch(ApiRequest::get("rooms/me")).await?;
        Ok(response.rooms)
    }

    pub async fn room(&self, room_id: i64) -> Result<Room, ApiError> {
        let response: RoomResponse = self.fetch(ApiRequest::get(format!("rooms/{}", room_id))).await?;
        Ok(response.room)
    }

    pub async fn create_room(&self, request: &CreateRoomRequest) -> Result<Room, ApiError> {
        validate_create_room(request)?;
        let form = RoomForm::from_create(request);
        let response: RoomResponse = self.fetch(ApiRequest::post("rooms").form(form)).await?;
        Ok(response.room)
    }

    pub async fn update_room(
        &self,
        room_id: i64,
        request: &UpdateRoomRequest,
    ) -> Result<Room, ApiError> {
        validate_update_room(request)?;
        let form = RoomForm::from_update(request);
        let response: RoomResponse = self
            .fetch(ApiRequest::put(format!("rooms/{}", room_id)).form(form))
            .await?;
        Ok(response.room)
    }

    pub async fn delete_room(&self, room_id: i64) -> Result<MessageResponse, ApiError> {
        self.send_for_message(ApiRequest::delete(format!("rooms/{}", room_id)))
            .await
    }

    pub async fn delete_price_increase_range(
        &self,
        range_id: i64,
    ) -> Result<MessageResponse, ApiError> {
        self.send_for_message(ApiRequest::delete(format!("rooms/increase-dates/{}", range_id)))
            .await
    }

    pub async fn delete_price_decrease_range(
        &self,
        range_id: i64,
    ) -> Result<MessageResponse, ApiError> {
        self.send_for_message(ApiRequest::delete(format!("rooms/decrease-dates/{}", range_id)))
            .await
    }

    pub async fn delete_excluded_range(&self, range_id: i64) -> Result<MessageResponse, ApiError> {
        self.send_for_message(ApiRequest::delete(format!("rooms/excluded-dates/{}", range_id)))
            .await
    }

    // Consolidates the selected days and submits them as price ranges.
    // The room is fetched first so days already adjusted in the other
    // direction are rejected before anything is sent.
    pub async fn apply_price_adjustment(
        &self,
        room_id: i64,
        selection: &DaySelection,
        adjustment: PriceAdjustment,
    ) -> Result<Room, ApiError> {
        let room = self.room(room_id).await?;
        let update = adjustment.to_update(selection, Some(&room))?;
        debug!(
            room_id,
            direction = %adjustment.direction(),
            percent = adjustment.percent(),
            days = selection.len(),
            "applying price adjustment"
        );
        self.update_room(room_id, &update).await
    }

    pub async fn exclude_days(
        &self,
        room_id: i64,
        selection: &DaySelection,
    ) -> Result<Room, ApiError> {
        let update = exclusion_update(selection)?;
        debug!(room_id, days = selection.len(), "excluding days");
        self.update_room(room_id, &update).await
    }

    // ---- Payout ----

    pub async fn payout_profiles(&self) -> Result<Vec<PayoutProfile>, ApiError> {
        let response: PayoutProfilesResponse = self.fetch(ApiRequest::get("payout")).await?;
        Ok(response.payout_profiles)
    }

    pub async fn payout_profile(&self, profile_id: i64) -> Result<PayoutProfile, ApiError> {
        let response: PayoutProfileResponse = self
            .fetch(ApiRequest::get(format!("payout/{}", profile_id)))
            .await?;
        Ok(response.payout_profile)
    }

    pub async fn create_payout_profile(
        &self,
        request: &CreatePayoutProfileRequest,
    ) -> Result<PayoutProfile, ApiError> {
        let response: PayoutProfileResponse = self
            .fetch(ApiRequest::post("payout").json(request)?)
            .await?;
        Ok(response.payout_profile)
    }

    pub async fn update_payout_profile(
        &self,
        profile_id: i64,
        request: &UpdatePayoutProfileRequest,
    ) -> Result<PayoutProfile, ApiError> {
        let response: PayoutProfileResponse = self
            .fetch(ApiRequest::put(format!("payout/{}", profile_id)).json(request)?)
            .await?;
        Ok(response.payout_profile)
    }

    pub async fn delete_payout_profile(&self, profile_id: i64) -> Result<MessageResponse, ApiError> {
        self.send_for_message(ApiRequest::delete(format!("payout/{}", profile_id)))
            .await
    }

    pub async fn request_payout(
        &self,
        request: &RequestPayoutRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.send_for_message(ApiRequest::post("payout/request").json(request)?)
            .await
    }

    // ---- Profile ----

    pub async fn profile(&self) -> Result<Profile, ApiError> {
        let response: ProfileResponse = self.fetch(ApiRequest::get("profile/me")).await?;
        Ok(response.profile)
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<Profile, ApiError> {
        validate_update_profile(request)?;
        let response: ProfileResponse = self
            .fetch(ApiRequest::put("profile/me").json(request)?)
            .await?;
        Ok(response.profile)
    }

    pub async fn change_email(
        &self,
        request: &ChangeEmailInitiateRequest,
    ) -> Result<MessageResponse, ApiError> {
        validate_change_email(request)?;
        self.send_for_message(ApiRequest::post("profile/me/change-email").json(request)?)
            .await
    }

    pub async fn verify_email_change(
        &self,
        request: &VerifyEmailChangeRequest,
    ) -> Result<MessageResponse, ApiError> {
        validate_verify_email_change(request)?;
        self.send_for_message(ApiRequest::post("profile/me/verify-email-change").json(request)?)
            .await
    }

    // ---- Reviews, statistics, lookups ----

    pub async fn reviews(&self, room_id: Option<i64>) -> Result<Vec<Review>, ApiError> {
        let mut request = ApiRequest::get("ratings/me");
        if let Some(room_id) = room_id {
            request = request.query("roomId", room_id);
        }
        let response: ReviewsResponse = self.fetch(request).await?;
        Ok(response.reviews)
    }

    pub async fn statistics(&self) -> Result<StatisticsData, ApiError> {
        let response: StatisticsResponse = self.fetch(ApiRequest::get("home/statistics")).await?;
        Ok(response.statistics)
    }

    pub async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        let response: CountriesResponse = self.fetch(ApiRequest::get("countries")).await?;
        Ok(response.countries)
    }

    pub async fn governments(&self, country_id: i64) -> Result<Vec<Government>, ApiError> {
        let response: GovernmentsResponse = self
            .fetch(ApiRequest::get("governments").query("countryId", country_id))
            .await?;
        Ok(response.governments)
    }

    pub async fn facilities(&self) -> Result<Vec<Facility>, ApiError> {
        let response: FacilitiesResponse = self.fetch(ApiRequest::get("facilities")).await?;
        Ok(response.facilities)
    }

    pub async fn room_types(&self) -> Result<Vec<RoomType>, ApiError> {
        let response: RoomTypesResponse = self.fetch(ApiRequest::get("room-types")).await?;
        Ok(response.room_types)
    }
}
