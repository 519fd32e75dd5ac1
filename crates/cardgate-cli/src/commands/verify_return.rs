//! `cardgate verify-return`: check the fields appended to the return URL.

use clap::Args;
use url::{form_urlencoded, Url};

use cardgate_client::ClientConfig;
use cardgate_crypto::verify_gateway_return;

#[derive(Args, Debug)]
pub struct VerifyReturnArgs {
    /// Query string of the return request, with or without the leading `?`,
    /// or the whole return URL.
    pub query: String,
}

/// Name/value pairs of a return query string, form body, or full return URL.
fn parse_query(input: &str) -> anyhow::Result<Vec<(String, String)>> {
    if input.contains("://") {
        let url = Url::parse(input)?;
        return Ok(url.query_pairs().into_owned().collect());
    }
    Ok(form_urlencoded::parse(input.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect())
}

pub fn run(config: &ClientConfig, args: &VerifyReturnArgs) -> anyhow::Result<()> {
    let key = config.load_gateway_public_key()?;
    let response = verify_gateway_return(parse_query(&args.query)?, &key)?;
    super::print_response(&response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_decodes_values() {
        let pairs = parse_query("?payId=abc&resultCode=0&signature=ab%2Bc%2F%3D%3D").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("payId".to_string(), "abc".to_string()),
                ("resultCode".to_string(), "0".to_string()),
                ("signature".to_string(), "ab+c/==".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_query_plus_is_space() {
        let pairs = parse_query("resultMessage=Payment+OK&flag").unwrap();
        assert_eq!(pairs[0].1, "Payment OK");
        assert_eq!(pairs[1], ("flag".to_string(), String::new()));
    }

    #[test]
    fn test_parse_query_accepts_full_return_url() {
        let pairs =
            parse_query("https://shop.test/return?payId=abc&resultMessage=OK%20%C5%BD").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("payId".to_string(), "abc".to_string()),
                ("resultMessage".to_string(), "OK Ž".to_string()),
            ]
        );
        assert!(parse_query("https://").is_err());
    }
}
