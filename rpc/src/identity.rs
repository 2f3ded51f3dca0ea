//! Actor resolution from trusted request headers.

use crate::error::RpcError;
use axum::http::HeaderMap;
use camara_types::{Actor, Role};

pub const VOTER_HEADER: &str = "x-voter-id";
pub const ROLE_HEADER: &str = "x-role";

/// Build the acting identity from the headers set by the fronting proxy.
pub fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, RpcError> {
    let id = header_str(headers, VOTER_HEADER)?;
    let role = header_str(headers, ROLE_HEADER)?
        .parse::<Role>()
        .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;
    Ok(Actor::new(id, role))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, RpcError> {
    let value = headers
        .get(name)
        .ok_or(RpcError::MissingIdentity(name))?
        .to_str()
        .map_err(|_| RpcError::InvalidRequest(format!("{name} is not valid text")))?
        .trim();
    if value.is_empty() {
        return Err(RpcError::MissingIdentity(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn resolves_actor() {
        let mut headers = HeaderMap::new();
        headers.insert(VOTER_HEADER, HeaderValue::from_static("v1"));
        headers.insert(ROLE_HEADER, HeaderValue::from_static("manager"));
        let actor = actor_from_headers(&headers).unwrap();
        assert_eq!(actor, Actor::new("v1", Role::Manager));
    }

    #[test]
    fn rejects_missing_or_unknown_role() {
        let mut headers = HeaderMap::new();
        headers.insert(VOTER_HEADER, HeaderValue::from_static("v1"));
        assert!(matches!(
            actor_from_headers(&headers),
            Err(RpcError::MissingIdentity(ROLE_HEADER))
        ));
        headers.insert(ROLE_HEADER, HeaderValue::from_static("mayor"));
        assert!(matches!(
            actor_from_headers(&headers),
            Err(RpcError::InvalidRequest(_))
        ));
    }
}
