// Multipart encoding of room create/update requests.
// The backend binds form fields by name, with indexed names for list entries.

use crate::models::{
    CreateRoomRequest, ExcludedDateRange, ImageUpload, PriceDecreaseRange, PriceIncreaseRange,
    UpdateRoomRequest,
};
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(ImageUpload),
}

// Ordered list of form fields; names may repeat (`GalleryImages`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomForm {
    fields: Vec<(String, FormValue)>,
}

impl RoomForm {
    pub fn from_create(request: &CreateRoomRequest) -> Self {
        let mut form = Self::default();

        form.text("RoomName", request.room_name.trim());
        form.text("RoomType", request.room_type);
        form.text("BedsCount", request.beds_count);
        form.text("Sqft", request.sqft);
        form.text("Price", request.price);
        form.text("NumberOfRooms", request.number_of_rooms);
        form.facilities(&request.facilities);
        if let Some(image) = &request.feature_image {
            form.file("FeatureImage", image);
        }
        form.gallery(&request.gallery_images);
        form.ranges(
            &request.price_increase_ranges,
            &request.price_decrease_ranges,
            &request.excluded_date_ranges,
        );

        form
    }

    // Blank scalars are left out so the server keeps its current values.
    pub fn from_update(request: &UpdateRoomRequest) -> Self {
        let mut form = Self::default();

        if let Some(name) = request.room_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                form.text("RoomName", name);
            }
        }
        if let Some(room_type) = request.room_type {
            form.text("RoomType", room_type);
        }
        if let Some(beds) = request.beds_count {
            form.text("BedsCount", beds);
        }
        if let Some(sqft) = request.sqft {
            form.text("Sqft", sqft);
        }
        if let Some(price) = request.price {
            form.text("Price", price);
        }
        form.facilities(&request.facilities);
        if let Some(image) = &request.feature_image {
            form.file("FeatureImage", image);
        }
        form.gallery(&request.gallery_images);
        form.ranges(
            &request.price_increase_ranges,
            &request.price_decrease_ranges,
            &request.excluded_date_ranges,
        );

        form
    }

    fn text(&mut self, name: impl Into<String>, value: impl ToString) {
        self.fields
            .push((name.into(), FormValue::Text(value.to_string())));
    }

    fn file(&mut self, name: &str, image: &ImageUpload) {
        self.fields
            .push((name.to_string(), FormValue::File(image.clone())));
    }

    fn facilities(&mut self, ids: &[i64]) {
        for (i, id) in ids.iter().enumerate() {
            self.text(format!("Facilities[{}]", i), id);
        }
    }

    fn gallery(&mut self, images: &[ImageUpload]) {
        for image in images {
            self.file("GalleryImages", image);
        }
    }

    fn ranges(
        &mut self,
        increases: &[PriceIncreaseRange],
        decreases: &[PriceDecreaseRange],
        excluded: &[ExcludedDateRange],
    ) {
        for (i, r) in increases.iter().enumerate() {
            self.text(format!("PriceIncreaseRanges[{}].StartDate", i), r.range.start());
            self.text(format!("PriceIncreaseRanges[{}].EndDate", i), r.range.end());
            self.text(format!("PriceIncreaseRanges[{}].IncreaseValue", i), r.increase_value);
        }
        for (i, r) in decreases.iter().enumerate() {
            self.text(format!("PriceDecreaseRanges[{}].StartDate", i), r.range.start());
            self.text(format!("PriceDecreaseRanges[{}].EndDate", i), r.range.end());
            self.text(format!("PriceDecreaseRanges[{}].DecreaseValue", i), r.decrease_value);
        }
        for (i, r) in excluded.iter().enumerate() {
            self.text(format!("ExcludedDateRanges[{}].StartDate", i), r.range.start());
            self.text(format!("ExcludedDateRanges[{}].EndDate", i), r.range.end());
        }
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // Text value of the first field called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::File(image) => {
                    let part = Part::bytes(image.bytes.to_vec())
                        .file_name(image.file_name)
                        .mime_str(&image.content_type)?;
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}
