//! Praat client implementation.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::config::ClientConfig;
use crate::error::{PraatError, Result};
use crate::form::{Form, OperationRequest, Route};
use crate::loader::{load_blob, load_pair};
use crate::response::{parse_alignment, parse_status_code, ServiceReply};
use crate::transport::{HttpRequest, Transport, UreqTransport};
use crate::types::{AudioBlob, AveragePitch, Timestamp, TransferOptions};

/// Client for a remote Praat processing service.
///
/// Every operation loads the audio it needs, builds a multipart form,
/// POSTs it to the operation's route and decodes the reply. Calls are
/// independent: nothing is cached and nothing is retried.
///
/// Operations block the calling thread. Use [`PraatClient::run_async`]
/// from async code.
///
/// # Example
///
/// ```rust,ignore
/// use praat_client::{ClientConfig, PraatClient};
///
/// let client = PraatClient::with_config(ClientConfig::new("http://localhost:8080"))?;
/// let timestamps = client.calc_timestamps("http://cdn/hello.wav", "hello world")?;
/// let resynth = client.transfer_prosody(
///     "http://cdn/teacher.wav",
///     "http://cdn/student.wav",
///     &teacher_timestamps,
///     &timestamps,
/// )?;
/// ```
pub struct PraatClient<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T: Transport> Clone for PraatClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl PraatClient<UreqTransport> {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> PraatClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        debug!(target: "praat_client", "PraatClient created for {}", config.base_url);
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Forced alignment of a recording against its transcript.
    ///
    /// Returns one timestamp per aligned word, in transcript order.
    pub fn calc_timestamps(&self, wav_url: &str, transcript: &str) -> Result<Vec<Timestamp>> {
        let wav = self.load(wav_url)?;
        let form = Form::new()
            .with("wavfile", wav)
            .with("transcript", transcript);

        let reply = self.dispatch(OperationRequest::new(Route::Align, form))?;
        let timestamps = parse_alignment(reply)?;
        debug!(target: "praat_client", "Aligned {} words", timestamps.len());
        Ok(timestamps)
    }

    /// Average pitch of a recording, as reported by the service.
    pub fn calc_average_pitch(&self, wav_url: &str) -> Result<AveragePitch> {
        let wav = self.load(wav_url)?;
        let form = Form::new().with("wavfile", wav);

        let reply = self.dispatch(OperationRequest::new(Route::AveragePitch, form))?;
        Ok(AveragePitch::new(reply.into_text()))
    }

    /// Carry the pitch contour of the source recording onto the target.
    pub fn transfer_prosody(
        &self,
        src_url: &str,
        target_url: &str,
        src_timestamps: &[Timestamp],
        target_timestamps: &[Timestamp],
    ) -> Result<AudioBlob> {
        self.synthesize_pair(
            Route::ProsodicSynthesis,
            src_url,
            target_url,
            src_timestamps,
            target_timestamps,
            None,
        )
    }

    /// Carry the intensity contour of the source recording onto the target.
    pub fn transfer_intensity(
        &self,
        src_url: &str,
        target_url: &str,
        src_timestamps: &[Timestamp],
        target_timestamps: &[Timestamp],
    ) -> Result<AudioBlob> {
        self.synthesize_pair(
            Route::IntensitySynthesis,
            src_url,
            target_url,
            src_timestamps,
            target_timestamps,
            None,
        )
    }

    /// Stretch the target's words to the source's durations.
    ///
    /// Only the target audio is needed; source timing comes from the
    /// timestamps.
    pub fn transfer_duration(
        &self,
        target_url: &str,
        src_timestamps: &[Timestamp],
        target_timestamps: &[Timestamp],
    ) -> Result<AudioBlob> {
        let target = self.load(target_url)?;
        let form = Form::new()
            .with("srctimestamps", src_timestamps)
            .with("twav", target)
            .with("ttimestamps", target_timestamps);

        self.dispatch(OperationRequest::new(Route::DurationSynthesis, form))?
            .into_audio()
    }

    /// Transfer any combination of prosody, intensity and duration.
    pub fn transfer(
        &self,
        src_url: &str,
        target_url: &str,
        src_timestamps: &[Timestamp],
        target_timestamps: &[Timestamp],
        options: TransferOptions,
    ) -> Result<AudioBlob> {
        self.synthesize_pair(
            Route::Synthesize,
            src_url,
            target_url,
            src_timestamps,
            target_timestamps,
            Some(options),
        )
    }

    /// Ask the service to send `text` back. Useful as a connectivity check.
    pub fn echo(&self, text: &str) -> Result<String> {
        let form = Form::new().with("txt", text);
        Ok(self
            .dispatch(OperationRequest::new(Route::Echo, form))?
            .into_text())
    }

    /// Store a recording of a single word for a user.
    pub fn store_word(&self, user: &str, word: &str, wav_url: &str) -> Result<()> {
        let wav = self.load(wav_url)?;
        let form = Form::new()
            .with("user", user)
            .with("word", word)
            .with("wav", wav);

        let text = match self.dispatch(OperationRequest::new(Route::StoreWord, form))? {
            ServiceReply::Text(text) => text,
            ServiceReply::Audio(blob) => {
                return Err(PraatError::MalformedResponse(format!(
                    "expected store status, got {} bytes of audio",
                    blob.len()
                )));
            }
        };

        match parse_status_code(&text) {
            Some(1) => Ok(()),
            Some(-1) => Err(PraatError::UnknownUser(user.to_string())),
            _ => Err(PraatError::ServiceReported(text)),
        }
    }

    /// Fetch a stored recording of `word` said by `user`.
    ///
    /// `example_url` points at an example pronunciation for the service to
    /// match against; it is sent as an empty field when absent.
    pub fn recall_word(
        &self,
        user: &str,
        word: &str,
        example_url: Option<&str>,
    ) -> Result<AudioBlob> {
        let mut form = Form::new().with("user", user).with("word", word);
        match example_url {
            Some(url) => form.push("examplewav", self.load(url)?),
            None => form.push("examplewav", ""),
        }

        match self.dispatch(OperationRequest::new(Route::RecallWord, form))? {
            ServiceReply::Audio(blob) => Ok(blob),
            ServiceReply::Text(text) => Err(match parse_status_code(&text) {
                Some(0) => PraatError::WordNotFound(word.to_string()),
                Some(-1) => PraatError::UnknownUser(user.to_string()),
                Some(-2) => PraatError::AudioMissing(word.to_string()),
                _ => PraatError::ServiceReported(text),
            }),
        }
    }

    fn synthesize_pair(
        &self,
        route: Route,
        src_url: &str,
        target_url: &str,
        src_timestamps: &[Timestamp],
        target_timestamps: &[Timestamp],
        options: Option<TransferOptions>,
    ) -> Result<AudioBlob> {
        debug!(target: "praat_client", "{}: loading {} and {}", route, src_url, target_url);
        let (src, target) = load_pair(self.transport.as_ref(), src_url, target_url)?;

        let mut form = Form::new()
            .with("srcwav", src)
            .with("srctimestamps", src_timestamps)
            .with("twav", target)
            .with("ttimestamps", target_timestamps);
        if let Some(options) = options {
            form.push("options", options.to_string());
        }

        self.dispatch(OperationRequest::new(route, form))?
            .into_audio()
    }

    fn load(&self, url: &str) -> Result<AudioBlob> {
        debug!(target: "praat_client", "Loading {}", url);
        load_blob(self.transport.as_ref(), url)
    }

    /// Validate, send and classify one operation request.
    fn dispatch(&self, request: OperationRequest) -> Result<ServiceReply> {
        let OperationRequest { route, form } = request;
        form.validate()?;

        let url = self.config.route_url(route);
        if self.config.debug {
            info!(target: "praat_client", "POST {} ({} fields)", url, form.len());
        }

        let start = Instant::now();
        let response = self.transport.send(HttpRequest::post(url, form))?;
        let elapsed = start.elapsed();

        if self.config.debug {
            info!(
                target: "praat_client",
                "{} -> {} ({} bytes, {:?}) in {:?}",
                route,
                response.status,
                response.body.len(),
                response.content_type,
                elapsed
            );
        }

        if !response.is_ok() {
            debug!(target: "praat_client", "{} failed with status {}", route, response.status);
            return Err(PraatError::Transport {
                status: response.status,
            });
        }

        Ok(ServiceReply::from_response(response))
    }
}

impl<T: Transport + 'static> PraatClient<T> {
    /// Run a blocking operation on tokio's blocking pool.
    ///
    /// ```rust,ignore
    /// let ts = client
    ///     .run_async(|c| c.calc_timestamps("http://cdn/a.wav", "cat sat"))
    ///     .await?;
    /// ```
    pub async fn run_async<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&PraatClient<T>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || op(&client))
            .await
            .map_err(|e| PraatError::TaskJoin(e.to_string()))?
    }
}
