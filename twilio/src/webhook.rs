use crate::{Client, FromMap, TwilioError};
use http_body_util::BodyExt;
use hyper::{
    body::{Body, Bytes},
    Request,
};
use std::collections::BTreeMap;

/// Decodes a form body, rejecting malformed percent escapes instead of
/// passing them through. Repeated keys keep their first value.
fn args_from_urlencoded(enc: &[u8]) -> Result<BTreeMap<String, String>, TwilioError> {
    check_percent_escapes(enc)?;

    let mut args = BTreeMap::new();
    for (key, value) in url::form_urlencoded::parse(enc).into_owned() {
        args.entry(key).or_insert(value);
    }
    Ok(args)
}

fn check_percent_escapes(enc: &[u8]) -> Result<(), TwilioError> {
    let mut bytes = enc.iter();
    while let Some(&b) = bytes.next() {
        if b != b'%' {
            continue;
        }
        match (bytes.next(), bytes.next()) {
            (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {}
            _ => return Err(TwilioError::BadRequest),
        }
    }
    Ok(())
}

impl Client {
    /// Parses the webhook form body into `T`. Request signatures are not checked.
    pub async fn parse_request<B, T: FromMap>(&self, req: Request<B>) -> Result<Box<T>, TwilioError>
    where
        B: Body<Data = Bytes>,
    {
        let body = req
            .into_body()
            .collect()
            .await
            .map_err(|_| TwilioError::BadRequest)?
            .to_bytes();

        T::from_map(args_from_urlencoded(&body)?)
    }
}
