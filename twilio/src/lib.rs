mod media;
mod message;
pub mod twiml;
mod webhook;

use headers::HeaderMapExt;
use hyper::body::{Body, Bytes};
use hyper::{Response, StatusCode};
pub use message::{Media, Message};
use reqwest::Client as ReqwestClient;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::Future;

#[derive(Clone)]
pub struct Client {
    account_id: String,
    auth_token: String,
    client: ReqwestClient,
}

#[derive(Debug)]
pub enum TwilioError {
    ReqwestError(reqwest::Error),
    HTTPError(reqwest::StatusCode),
    BadRequest,
}

impl Display for TwilioError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            TwilioError::ReqwestError(ref e) => e.fmt(f),
            TwilioError::HTTPError(ref s) => write!(f, "Invalid HTTP status code: {}", s),
            TwilioError::BadRequest => f.write_str("Bad request"),
        }
    }
}

impl Error for TwilioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            TwilioError::ReqwestError(ref e) => Some(e),
            _ => None,
        }
    }
}

pub trait FromMap {
    fn from_map(m: BTreeMap<String, String>) -> Result<Box<Self>, TwilioError>;
}

impl Client {
    pub fn new(account_id: &str, auth_token: &str) -> Client {
        Client {
            account_id: account_id.to_string(),
            auth_token: auth_token.to_string(),
            client: ReqwestClient::new(),
        }
    }

    /// Parses the webhook form into `T` and answers with the TwiML built by
    /// `logic`, or with 400 when the form is malformed.
    pub async fn respond_to_webhook_async<B, T: FromMap, F, Fut>(
        &self,
        req: hyper::Request<B>,
        logic: F,
    ) -> Response<String>
    where
        B: Body<Data = Bytes>,
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = twiml::Twiml>,
    {
        let o = match self.parse_request::<B, T>(req).await {
            Ok(obj) => *obj,
            Err(e) => return bad_request(e),
        };

        xml_response(logic(o).await.as_twiml())
    }
}

fn xml_response(twiml: String) -> Response<String> {
    let mut res = Response::new(twiml);
    res.headers_mut().typed_insert(headers::ContentType::xml());
    res
}

fn bad_request(error: TwilioError) -> Response<String> {
    let mut res = Response::new(error.to_string());
    *res.status_mut() = StatusCode::BAD_REQUEST;
    res.headers_mut().typed_insert(headers::ContentType::text_utf8());
    res
}
