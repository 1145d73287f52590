use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::services::upstream::AuthContext;
use crate::state::AppState;

/// Handler で AuthContext を受け取るための extractor
/// token が無くても reject しない (上流に認証なしで送り、401 なら /login へ)
pub struct Auth(pub AuthContext);

impl FromRequestParts<AppState> for Auth
where
    AppState: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(&state.cookies.token_name).map(|c| c.value());
        let token_type = jar.get(&state.cookies.token_type_name).map(|c| c.value());

        Ok(Auth(AuthContext::resolve(
            token,
            token_type,
            &state.auth_defaults,
        )))
    }
}
