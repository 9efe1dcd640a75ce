//! Submission flow: payload assembly and the request lifecycle state
//! machine.

pub mod controller;

pub use controller::{SubmissionController, SubmissionState, SubmitOutcome, SUBMIT_TIMEOUT};

use crate::api::{MultipartPayload, RequestBody};
use crate::form::FormModel;
use crate::media::StagedFile;

/// Assemble the multipart body for an image-bearing form: the flattened
/// fields, at most one `mainImage` part, and any number of
/// `galleryImages` parts.
pub fn multipart_body(
    form: &FormModel,
    main_image: Option<StagedFile>,
    gallery: Vec<StagedFile>,
) -> RequestBody {
    let mut payload = MultipartPayload::new(form.to_fields());
    if let Some(main) = main_image {
        payload.attach("mainImage", main);
    }
    for file in gallery {
        payload.attach("galleryImages", file);
    }
    RequestBody::Multipart(payload)
}

/// Single-file variant used by the team forms, where the API expects one
/// `image` part.
pub fn person_body(form: &FormModel, image: Option<StagedFile>) -> RequestBody {
    let mut payload = MultipartPayload::new(form.to_fields());
    if let Some(file) = image {
        payload.attach("image", file);
    }
    RequestBody::Multipart(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str) -> StagedFile {
        StagedFile {
            name: name.into(),
            content_type: "image/jpeg".into(),
            bytes: vec![1, 2, 3],
            compressed: true,
        }
    }

    #[test]
    fn multipart_body_names_parts_per_api_contract() {
        let form = FormModel::new().with_text("title", "Clay Pavilion");
        let body = multipart_body(
            &form,
            Some(staged("main.jpg")),
            vec![staged("g-0.jpg"), staged("g-1.jpg")],
        );

        let RequestBody::Multipart(payload) = body else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = payload.files.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["mainImage", "galleryImages", "galleryImages"]);
        assert_eq!(payload.fields, vec![("title".to_string(), "Clay Pavilion".to_string())]);
    }

    #[test]
    fn person_body_uses_the_single_image_part() {
        let form = FormModel::new().with_text("name", "Priya");
        let RequestBody::Multipart(payload) = person_body(&form, Some(staged("priya.png")))
        else {
            panic!("expected multipart body");
        };
        assert_eq!(payload.files.len(), 1);
        assert_eq!(payload.files[0].0, "image");
    }
}
