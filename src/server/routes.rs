use crate::config::GeneratorConfig;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn ok(content_type: &'static str, body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type,
            body,
        }
    }

    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(config: &GeneratorConfig, method: &str, path: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    match (method, route) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => HttpResponse::ok("application/json", payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/config") => match api::config_payload(config) {
            Ok(payload) => HttpResponse::ok("application/json", payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/resolve") => match api::resolve_payload(config, path) {
            Ok(payload) => HttpResponse::ok("application/json", payload),
            Err(err) => api_error_response(err),
        },
        ("GET", "/api/dataset") => match api::dataset_payload(config, path) {
            Ok((payload, format)) => HttpResponse::ok(format.content_type(), payload),
            Err(err) => api_error_response(err),
        },
        (_, "/api/health" | "/api/config" | "/api/resolve" | "/api/dataset") => {
            error_response(405, "Method Not Allowed", &format!("{method} not allowed on {route}"))
        }
        _ => error_response(404, "Not Found", &format!("no route for {method} {route}")),
    }
}

fn api_error_response(err: api::ApiError) -> HttpResponse {
    if err.is_client_error() {
        error_response(400, "Bad Request", &err.to_string())
    } else {
        error_response(500, "Internal Server Error", &err.to_string())
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
