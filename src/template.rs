use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";

pub struct Template;

impl Template {
    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        self.render_with_status(StatusCode::OK, template)
    }

    pub fn render_with_status<T: askama::Template>(
        &self,
        status: StatusCode,
        template: T,
    ) -> Response {
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!("Failed to render template: {err}");

                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
            }
        }
    }
}
