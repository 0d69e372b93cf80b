use std::time::Duration;

use async_trait::async_trait;
use slog_scope::{debug, warn};

use super::error::OracleError;
use super::webdriver::{ENTER_KEY, ElementRef, WebDriverError, WebDriverSession};
use super::TransliterationOracle;
use crate::StdError;
use crate::poll;
use crate::utils::PollOutcome;

/// Tuning of the [WebPageOracle] interaction.
#[derive(Debug, Clone)]
pub struct WebPageOracleConfig {
    /// Url of the transliteration page.
    pub page_url: String,
    /// Bounded wait for the page to expose both text surfaces.
    pub discovery_timeout: Duration,
    /// Bounded wait for the output surface to settle after submission.
    ///
    /// The oracle gives no completion signal, so settling is a heuristic:
    /// too short a window causes false negatives while the oracle is still
    /// processing, too long a window only costs wall-clock time.
    pub settling_window: Duration,
    /// Interval between two reads of the output surface.
    pub poll_interval: Duration,
    /// When set, a settling window that elapses without any observed
    /// output change fails the case with [OracleError::SettlingTimeout]
    /// instead of yielding the unchanged (possibly empty) output.
    pub strict_settling: bool,
}

impl Default for WebPageOracleConfig {
    fn default() -> Self {
        Self {
            page_url: "https://tamil.changathi.com/".to_string(),
            discovery_timeout: Duration::from_secs(10),
            settling_window: Duration::from_millis(2500),
            poll_interval: Duration::from_millis(250),
            strict_settling: false,
        }
    }
}

/// The concrete oracle adapter: drives the transliteration web page
/// through a WebDriver session.
///
/// Every [TransliterationOracle::transliterate] call re-navigates to the
/// page, so each case starts from a clean oracle state.
pub struct WebPageOracle {
    session: WebDriverSession,
    config: WebPageOracleConfig,
}

impl WebPageOracle {
    pub fn new(session: WebDriverSession, config: WebPageOracleConfig) -> Self {
        Self { session, config }
    }

    /// Wait for the page to expose its two text surfaces: the first
    /// textarea is the input, the second holds the transliterated output.
    async fn discover_surfaces(&self) -> Result<(ElementRef, ElementRef), OracleError> {
        let outcome: PollOutcome<(ElementRef, ElementRef), WebDriverError> = poll!(
            self.config.discovery_timeout,
            self.config.poll_interval,
            {
                match self.session.find_elements("textarea").await {
                    Ok(elements) => {
                        let mut elements = elements.into_iter();
                        match (elements.next(), elements.next()) {
                            (Some(input), Some(output)) => Ok(Some((input, output))),
                            _ => Ok(None),
                        }
                    }
                    Err(error) => Err(error),
                }
            }
        );

        match outcome {
            PollOutcome::Ok(surfaces) => Ok(surfaces),
            PollOutcome::Err(error) => Err(interaction_error("textarea discovery", error)),
            PollOutcome::TimedOut { waited } => {
                debug!("Surface discovery timed out"; "waited" => ?waited);
                Err(OracleError::SurfaceNotFound {
                    surface: "second textarea".to_string(),
                })
            }
        }
    }

    /// Poll the output surface until its value has changed from the
    /// pre-submit reading and is stable across two consecutive reads, or
    /// the settling window elapses.
    async fn settle_output(
        &self,
        output: &ElementRef,
        before_submit: &str,
    ) -> Result<String, OracleError> {
        let mut last_read: Option<String> = None;

        let outcome: PollOutcome<String, WebDriverError> = poll!(
            self.config.settling_window,
            self.config.poll_interval,
            {
                match self.session.element_value(output).await {
                    Ok(current) => {
                        let settled = current != before_submit
                            && last_read.as_deref() == Some(current.as_str());
                        if settled {
                            Ok(Some(current))
                        } else {
                            last_read = Some(current);
                            Ok(None)
                        }
                    }
                    Err(error) => Err(error),
                }
            }
        );

        match outcome {
            PollOutcome::Ok(value) => Ok(value),
            PollOutcome::Err(error) => Err(interaction_error("output surface", error)),
            PollOutcome::TimedOut { waited } => {
                let final_value = last_read.unwrap_or_default();
                if self.config.strict_settling && final_value == before_submit {
                    Err(OracleError::SettlingTimeout { waited })
                } else {
                    debug!(
                        "Settling window elapsed, keeping last read";
                        "waited" => ?waited, "value" => &final_value
                    );
                    Ok(final_value)
                }
            }
        }
    }
}

#[async_trait]
impl TransliterationOracle for WebPageOracle {
    async fn transliterate(&mut self, input: &str) -> Result<String, OracleError> {
        self.session
            .navigate(&self.config.page_url)
            .await
            .map_err(|error| OracleError::Unreachable(StdError::from(error)))?;

        let (input_surface, output_surface) = self.discover_surfaces().await?;

        self.session
            .clear(&input_surface)
            .await
            .map_err(|error| interaction_error("input surface", error))?;
        let before_submit = self
            .session
            .element_value(&output_surface)
            .await
            .map_err(|error| interaction_error("output surface", error))?;

        self.session
            .send_keys(&input_surface, &format!("{input}{ENTER_KEY}"))
            .await
            .map_err(|error| interaction_error("input surface", error))?;

        self.settle_output(&output_surface, &before_submit).await
    }

    async fn close(&mut self) -> Result<(), OracleError> {
        if let Err(error) = self.session.close().await {
            warn!("Failed to close the webdriver session"; "error" => ?error);
        }

        Ok(())
    }
}

/// An element interaction that fails on transport means the remote end is
/// gone; any protocol-level failure means the page no longer matches the
/// expected structure.
fn interaction_error(surface: &str, error: WebDriverError) -> OracleError {
    if error.is_transport() {
        OracleError::Unreachable(StdError::from(error))
    } else {
        OracleError::SurfaceNotFound {
            surface: format!("{surface}: {error}"),
        }
    }
}
