pub(crate) mod page;

use crate::{controller::FormInput, domain::FieldErrors};

use actix_web::{http::header::ContentType, HttpResponse};

/// Landing page with an empty form; also where "subscribe to another topic" leads.
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page::form_view(
            &FormInput::default(),
            &FieldErrors::default(),
            &[],
        ))
}
