use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap, HeaderName},
};

static FORWARDED_FOR_HEADER_NAME: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Where the client address is taken from. Only trust `X-Forwarded-For`
/// behind a proxy that overwrites it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum ClientIpSource {
    #[default]
    Peer,
    ForwardedFor,
}

#[derive(Debug, Clone)]
pub struct ExtractClientIp(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ExtractClientIp
where
    S: Send + Sync,
{
    type Rejection = ();

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let source = parts
            .extensions
            .get::<ClientIpSource>()
            .copied()
            .unwrap_or_default();

        let forwarded = match source {
            ClientIpSource::ForwardedFor => forwarded_for(&parts.headers),
            ClientIpSource::Peer => None,
        };

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(Self(forwarded.or(peer)))
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&FORWARDED_FOR_HEADER_NAME)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(ToString::to_string)
}
