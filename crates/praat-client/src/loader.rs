//! Resource loading: fetch audio by URL.

use std::thread;

use log::{debug, warn};

use crate::error::{PraatError, Result};
use crate::form::Form;
use crate::transport::{HttpRequest, Method, Transport};
use crate::types::AudioBlob;

/// Fetch the resource at `url` as a blob.
///
/// `payload` is only sent with body-carrying methods. Resolves on status 200
/// and fails with [`PraatError::Transport`] on anything else. Never retries.
pub fn load_resource<T>(
    transport: &T,
    url: &str,
    method: Method,
    payload: Option<Form>,
) -> Result<AudioBlob>
where
    T: Transport + ?Sized,
{
    let body = match payload {
        Some(form) if method.has_body() => Some(form),
        Some(_) => {
            warn!(
                target: "praat_client",
                "Ignoring payload on {} {}",
                method.as_str(),
                url
            );
            None
        }
        None => None,
    };

    let response = transport.send(HttpRequest {
        method,
        url: url.to_string(),
        body,
    })?;

    if !response.is_ok() {
        debug!(target: "praat_client", "Loading {} failed with status {}", url, response.status);
        return Err(PraatError::Transport {
            status: response.status,
        });
    }

    debug!(target: "praat_client", "Loaded {} ({} bytes)", url, response.body.len());
    let blob = AudioBlob::new(response.body);
    Ok(match response.content_type {
        Some(ct) => blob.with_content_type(ct),
        None => blob,
    })
}

/// GET a resource.
pub fn load_blob<T>(transport: &T, url: &str) -> Result<AudioBlob>
where
    T: Transport + ?Sized,
{
    load_resource(transport, url, Method::Get, None)
}

/// GET two independent resources concurrently.
///
/// Both loads always run to completion. If both fail, the first URL's error
/// is returned.
pub fn load_pair<T>(
    transport: &T,
    first_url: &str,
    second_url: &str,
) -> Result<(AudioBlob, AudioBlob)>
where
    T: Transport + ?Sized,
{
    let (first, second) = thread::scope(|scope| {
        let handle = scope.spawn(|| load_blob(transport, second_url));
        let first = load_blob(transport, first_url);
        let second = handle
            .join()
            .unwrap_or_else(|_| Err(PraatError::TaskJoin("resource loader panicked".into())));
        (first, second)
    });

    Ok((first?, second?))
}
