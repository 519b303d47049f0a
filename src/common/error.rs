use std::{error::Error, fmt};

#[derive(Debug)]
pub enum OtcError {
    Simple(String),
    AddressParsing(String),
    StateDecode(String),
    OfferInvalid(String),
    Node(String),
    ModalClosed,
    WalletRejected(String),
    WalletTransport(String),
    Rest(reqwest::Error),
    Base64(base64::DecodeError),
    SerdesJson(serde_json::Error),
    StrumParsing(strum::ParseError),
    MpscSend(String),
}

impl Error for OtcError {}

impl fmt::Display for OtcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let error_string = match self {
            OtcError::Simple(msg) => format!("OTC-Error | Other - {}", msg),
            OtcError::AddressParsing(msg) => {
                format!("OTC-Error | AddressParsing - {}", msg)
            }
            OtcError::StateDecode(msg) => {
                format!("OTC-Error | StateDecode - {}", msg)
            }
            OtcError::OfferInvalid(msg) => {
                format!("OTC-Error | OfferInvalid - {}", msg)
            }
            OtcError::Node(msg) => {
                format!("OTC-Error | Node - {}", msg)
            }
            OtcError::ModalClosed => {
                "OTC-Error | ModalClosed - Wallet pairing UI closed by user".to_string()
            }
            OtcError::WalletRejected(msg) => {
                format!("OTC-Error | WalletRejected - {}", msg)
            }
            OtcError::WalletTransport(msg) => {
                format!("OTC-Error | WalletTransport - {}", msg)
            }
            OtcError::Rest(err) => {
                format!("OTC-Error | RestError - {}", err)
            }
            OtcError::Base64(err) => {
                format!("OTC-Error | Base64Error - {}", err)
            }
            OtcError::SerdesJson(err) => {
                format!("OTC-Error | SerdesJsonError - {}", err)
            }
            OtcError::StrumParsing(err) => {
                format!("OTC-Error | StrumParseError - {}", err)
            }
            OtcError::MpscSend(msg) => {
                format!("OTC-Error | MpscSendError - {}", msg)
            }
        };
        write!(f, "{}", error_string)
    }
}

impl OtcError {
    // The taxonomy the view layer cares about: a user closing the pairing UI is
    // not an error worth surfacing, everything else is.
    pub fn is_user_dismissal(&self) -> bool {
        matches!(self, OtcError::ModalClosed)
    }

    pub fn user_message(&self) -> String {
        match self {
            OtcError::WalletRejected(_) => "Request rejected in wallet".to_string(),
            OtcError::Node(msg) => msg.to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for OtcError {
    fn from(e: reqwest::Error) -> OtcError {
        OtcError::Rest(e)
    }
}

impl From<base64::DecodeError> for OtcError {
    fn from(e: base64::DecodeError) -> OtcError {
        OtcError::Base64(e)
    }
}

impl From<serde_json::Error> for OtcError {
    fn from(e: serde_json::Error) -> OtcError {
        OtcError::SerdesJson(e)
    }
}

impl From<strum::ParseError> for OtcError {
    fn from(e: strum::ParseError) -> OtcError {
        OtcError::StrumParsing(e)
    }
}

impl From<data_encoding::DecodeError> for OtcError {
    fn from(e: data_encoding::DecodeError) -> OtcError {
        OtcError::AddressParsing(e.to_string())
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for OtcError {
    fn from(e: tokio::sync::mpsc::error::SendError<T>) -> OtcError {
        OtcError::MpscSend(e.to_string())
    }
}
