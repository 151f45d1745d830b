use std::io::Read;

use crate::core::errors::{AdminError, Result};

use super::http::{HttpRequest, HttpResponse, Method};
use super::router::App;

/// Largest form body read from a POST.
const MAX_FORM_BODY: u64 = 64 * 1024;

/// Serve `app` on `bind` until the process is stopped.
///
/// Requests are handled one at a time on the calling thread.
pub fn serve(app: &App, bind: &str) -> Result<()> {
    let server = tiny_http::Server::http(bind).map_err(|e| AdminError::Server {
        reason: format!("failed to bind {bind}: {e}"),
    })?;
    tracing::info!(bind, "admin server listening");

    for mut request in server.incoming_requests() {
        let req = match to_http_request(&mut request) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable request");
                let _ = request.respond(
                    tiny_http::Response::from_string("Bad request").with_status_code(400),
                );
                continue;
            }
        };
        let response = app.handle(&req);
        if let Err(e) = request.respond(to_tiny_response(response)) {
            tracing::warn!(error = %e, path = %req.path, "failed to write response");
        }
    }
    Ok(())
}

fn to_http_request(request: &mut tiny_http::Request) -> Result<HttpRequest> {
    let method = Method::parse(&request.method().to_string());
    let mut req = HttpRequest::new(method, request.url());
    for header in request.headers() {
        req = req.with_header(header.field.as_str().as_str(), header.value.as_str());
    }

    if req.method == Method::Post {
        let mut body = String::new();
        request
            .as_reader()
            .take(MAX_FORM_BODY)
            .read_to_string(&mut body)?;
        req = req.with_form_body(&body);
    }
    Ok(req)
}

fn to_tiny_response(response: HttpResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let headers = response
        .headers
        .iter()
        .filter_map(|(name, value)| {
            tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
        });
    let mut out = tiny_http::Response::from_data(response.body).with_status_code(response.status);
    for header in headers {
        out = out.with_header(header);
    }
    out
}
