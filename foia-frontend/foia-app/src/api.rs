use foia_api_types::AgencyList;
use serde::de::DeserializeOwned;

use crate::error::AppResult;

pub(crate) async fn get_agencies(url: &str) -> AppResult<AgencyList> {
    fetch_api(url).await
}

#[cfg(feature = "csr")]
pub async fn fetch_api<T>(path: &str) -> AppResult<T>
where
    T: DeserializeOwned,
{
    use crate::error::AppError;

    let response = gloo_net::http::Request::get(path).send().await?;
    if !response.ok() {
        return Err(AppError::BadStatus(response.status()));
    }
    Ok(response.json().await?)
}

#[cfg(not(feature = "csr"))]
pub async fn fetch_api<T>(path: &str) -> AppResult<T>
where
    T: DeserializeOwned,
{
    use log::error;

    let response = reqwest::get(path).await.map_err(|e| {
        error!("Response {e}. {path}");
        e
    })?;
    read_response(response).await
}

#[cfg(not(feature = "csr"))]
async fn read_response<T>(response: reqwest::Response) -> AppResult<T>
where
    T: DeserializeOwned,
{
    use crate::error::AppError;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::BadStatus(status.as_u16()));
    }
    Ok(response.json().await?)
}
