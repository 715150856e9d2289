//! # Handlers Básicos
//! src/handlers/basic.rs
//!
//! - `GET /`: respuesta vacía
//! - `GET /get-sum/`: suma los dos enteros del header `two-numbers`
//! - `GET /echo/{texto}`: devuelve el texto tal cual

use crate::http::{Request, Response, StatusCode};
use crate::router::{RouteContext, RouteError};

/// Header que lleva los sumandos de `/get-sum/`
pub const TWO_NUMBERS_HEADER: &str = "two-numbers";

/// Handler para `GET /`
pub fn root_handler(_req: &Request, _suffix: &str, _ctx: &RouteContext) -> Result<Response, RouteError> {
    Ok(Response::new(StatusCode::Ok))
}

/// Handler para `GET /get-sum/`
///
/// El header debe tener la forma `<int>,<int>`. Se toleran espacios y
/// comillas alrededor del valor.
///
/// # Ejemplo
/// ```text
/// GET /get-sum/ HTTP/1.1
/// Two-Numbers: 3,4
///
/// → 200 OK, body "7"
/// ```
pub fn get_sum_handler(req: &Request, _suffix: &str, _ctx: &RouteContext) -> Result<Response, RouteError> {
    let raw = req
        .header(TWO_NUMBERS_HEADER)
        .ok_or_else(|| invalid_header("header missing"))?;

    let sum = parse_sum(raw)?;

    Ok(Response::new(StatusCode::Ok).with_body(&sum.to_string()))
}

fn parse_sum(raw: &str) -> Result<i64, RouteError> {
    let value = raw.trim().trim_matches('"');

    let (left, right) = value
        .split_once(',')
        .ok_or_else(|| invalid_header(&format!("expected two comma separated integers, got {:?}", raw)))?;

    let a = parse_operand(left)?;
    let b = parse_operand(right)?;

    a.checked_add(b)
        .ok_or_else(|| invalid_header(&format!("sum of {} and {} overflows", a, b)))
}

fn parse_operand(s: &str) -> Result<i64, RouteError> {
    s.trim()
        .parse::<i64>()
        .map_err(|e| invalid_header(&format!("{:?} is not an integer: {}", s, e)))
}

fn invalid_header(reason: &str) -> RouteError {
    RouteError::MissingOrInvalidHeader {
        header: TWO_NUMBERS_HEADER,
        reason: reason.to_string(),
    }
}

/// Handler para `GET /echo/{texto}`
///
/// El body es el sufijo sin decodificar. Sufijo vacío → body vacío.
pub fn echo_handler(_req: &Request, suffix: &str, _ctx: &RouteContext) -> Result<Response, RouteError> {
    Ok(Response::new(StatusCode::Ok).with_body(suffix))
}
