//! Access to the external transliteration oracle.
//!
//! The oracle contract is "text in, text out": [TransliterationOracle]
//! abstracts it so the case runner can be exercised against a scripted
//! fake, while [WebPageOracle] is the real adapter driving the web page
//! through a W3C WebDriver remote end.

mod error;
mod web_page;
mod webdriver;

use async_trait::async_trait;

pub use error::OracleError;
pub use web_page::{WebPageOracle, WebPageOracleConfig};
pub use webdriver::{ElementRef, WebDriverError, WebDriverSession};

/// A transliteration oracle: resets the external surface to a clean state,
/// submits the input and yields whatever output the oracle produced.
///
/// An absent output is reported as the empty string, never as an error.
#[async_trait]
pub trait TransliterationOracle: Send {
    async fn transliterate(&mut self, input: &str) -> Result<String, OracleError>;

    /// Release the underlying oracle session, if any.
    async fn close(&mut self) -> Result<(), OracleError> {
        Ok(())
    }
}
