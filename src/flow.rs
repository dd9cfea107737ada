//! Landing → form → loading → payment → result, as a tagged union with one
//! method per transition.

use crate::error::Error;
use crate::itinerary::{GeneratedItinerary, ItineraryGenerator, PreferenceRecord, request_itinerary};

pub const GENERATION_FAILED_MESSAGE: &str =
    "Desculpe, ocorreu um erro ao gerar seu roteiro. Por favor, tente novamente.";
pub const PDF_FAILED_MESSAGE: &str = "Não foi possível gerar o PDF. Por favor, tente novamente.";
pub const PDF_MISSING_CONTENT_MESSAGE: &str =
    "Não foi possível encontrar o conteúdo para gerar o PDF.";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum View {
    #[default]
    Landing,
    Form {
        error: Option<String>,
    },
    Loading {
        request: PreferenceRecord,
    },
    Payment {
        request: PreferenceRecord,
        itinerary: GeneratedItinerary,
    },
    Result {
        request: PreferenceRecord,
        itinerary: GeneratedItinerary,
        error: Option<String>,
        generating_pdf: bool,
    },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Form { .. } => "form",
            View::Loading { .. } => "loading",
            View::Payment { .. } => "payment",
            View::Result { .. } => "result",
        }
    }

    /// The message shown above the current view. Only the form and result
    /// views display one.
    pub fn error(&self) -> Option<&str> {
        match self {
            View::Form { error } | View::Result { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidTransition {
            from: self.name(),
            action,
        }
    }

    pub fn start(self) -> Result<View, Error> {
        match self {
            View::Landing => Ok(View::Form { error: None }),
            other => Err(other.invalid("start")),
        }
    }

    pub fn back_to_landing(self) -> Result<View, Error> {
        match self {
            View::Form { .. } => Ok(View::Landing),
            other => Err(other.invalid("go back to landing")),
        }
    }

    pub fn submit(self, request: PreferenceRecord) -> Result<View, Error> {
        match self {
            View::Form { .. } => Ok(View::Loading { request }),
            other => Err(other.invalid("submit")),
        }
    }

    pub fn generation_succeeded(self, itinerary: GeneratedItinerary) -> Result<View, Error> {
        match self {
            View::Loading { request } => Ok(View::Payment { request, itinerary }),
            other => Err(other.invalid("accept an itinerary")),
        }
    }

    pub fn generation_failed(self) -> Result<View, Error> {
        match self {
            View::Loading { .. } => Ok(View::Form {
                error: Some(GENERATION_FAILED_MESSAGE.to_string()),
            }),
            other => Err(other.invalid("report a generation failure")),
        }
    }

    /// The payment step is simulated; confirming always unlocks the result.
    pub fn confirm_payment(self) -> Result<View, Error> {
        match self {
            View::Payment { request, itinerary } => Ok(View::Result {
                request,
                itinerary,
                error: None,
                generating_pdf: false,
            }),
            other => Err(other.invalid("confirm payment")),
        }
    }

    pub fn new_itinerary(self) -> Result<View, Error> {
        match self {
            View::Result { .. } => Ok(View::Form { error: None }),
            other => Err(other.invalid("start a new itinerary")),
        }
    }

    /// Marks an export as running. A second export while one is in flight
    /// is refused.
    pub fn begin_pdf_export(self) -> Result<View, Error> {
        match self {
            View::Result {
                request,
                itinerary,
                generating_pdf: false,
                ..
            } => Ok(View::Result {
                request,
                itinerary,
                error: None,
                generating_pdf: true,
            }),
            other => Err(other.invalid("export a PDF")),
        }
    }

    /// Clears the in-progress flag whatever the outcome.
    pub fn finish_pdf_export(self, outcome: Result<(), &Error>) -> Result<View, Error> {
        match self {
            View::Result {
                request,
                itinerary,
                generating_pdf: true,
                ..
            } => {
                let error = match outcome {
                    Ok(()) => None,
                    Err(Error::MissingTarget) => Some(PDF_MISSING_CONTENT_MESSAGE.to_string()),
                    Err(e) => {
                        log::error!("Error generating PDF: {e}");
                        Some(PDF_FAILED_MESSAGE.to_string())
                    }
                };
                Ok(View::Result {
                    request,
                    itinerary,
                    error,
                    generating_pdf: false,
                })
            }
            other => Err(other.invalid("finish a PDF export")),
        }
    }
}

/// Runs the single generation attempt for a view in `Loading`.
pub fn run_generation(view: View, generator: &dyn ItineraryGenerator) -> Result<View, Error> {
    let outcome = match &view {
        View::Loading { request } => request_itinerary(generator, request),
        other => return Err(other.invalid("generate")),
    };
    match outcome {
        Ok(itinerary) => view.generation_succeeded(itinerary),
        Err(_) => view.generation_failed(),
    }
}

/// What the offer countdown does once it hits zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Stay at zero and report the offer as expired.
    #[default]
    Expire,
    /// Reload the initial value and keep counting.
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    hours: u32,
    minutes: u32,
    seconds: u32,
    initial: (u32, u32, u32),
    policy: ExpiryPolicy,
}

impl Countdown {
    pub fn new(hours: u32, minutes: u32, seconds: u32, policy: ExpiryPolicy) -> Self {
        Self {
            hours,
            minutes: minutes.min(59),
            seconds: seconds.min(59),
            initial: (hours, minutes.min(59), seconds.min(59)),
            policy,
        }
    }

    /// The landing page offer: twenty minutes.
    pub fn offer(policy: ExpiryPolicy) -> Self {
        Self::new(0, 20, 0, policy)
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    pub fn is_expired(&self) -> bool {
        self.policy == ExpiryPolicy::Expire && self.is_zero()
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Advances one second.
    pub fn tick(&mut self) {
        if self.seconds > 0 {
            self.seconds -= 1;
        } else if self.minutes > 0 {
            self.minutes -= 1;
            self.seconds = 59;
        } else if self.hours > 0 {
            self.hours -= 1;
            self.minutes = 59;
            self.seconds = 59;
        } else if self.policy == ExpiryPolicy::Restart {
            (self.hours, self.minutes, self.seconds) = self.initial;
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
