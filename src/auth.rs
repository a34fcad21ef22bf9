//! Request signatures.
//!
//! Every request carries `sg`, the lowercase hex SHA-256 digest of the shared
//! secret concatenated with the request timestamp and a few identifying
//! fields. The service recomputes the same concatenation, so the field order
//! of each [`Template`] is part of the wire contract.

use secrecy::{ExposeSecret as _, SecretString};
use sha2::{Digest as _, Sha256};

use crate::Timestamp;

/// Lowercase hex SHA-256 of `text`.
#[must_use]
pub fn sign(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Field layout hashed for each operation family.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Template<'input> {
    /// `secret, time, key, content`: create, update and raw create (base64 content).
    Object { key: &'input str, content: &'input str },
    /// `secret, time, key`: get, delete, upload, download, raw/range get and index mutations.
    Key { key: &'input str },
    /// `secret, category, time`: list by category.
    Category { category: &'input str },
    /// `secret, indexkey, time`: index list.
    IndexList { index_key: &'input str },
    /// `secret, time`: transaction begin.
    Begin,
    /// `secret, time, key, content, tsid`: transactional create and update.
    TransObject {
        tsid: &'input str,
        key: &'input str,
        content: &'input str,
    },
    /// `secret, time, key, tsid`: transactional get and delete.
    TransKey { tsid: &'input str, key: &'input str },
    /// `secret, time, tsid`: commit and rollback.
    TransId { tsid: &'input str },
}

impl Template<'_> {
    /// The exact text whose digest becomes the signature.
    #[must_use]
    pub fn text(&self, secret: &str, timestamp: Timestamp) -> String {
        let ts = timestamp.to_string();
        let parts: Vec<&str> = match *self {
            Template::Object { key, content } => vec![secret, ts.as_str(), key, content],
            Template::Key { key } => vec![secret, ts.as_str(), key],
            Template::Category { category } => vec![secret, category, ts.as_str()],
            Template::IndexList { index_key } => vec![secret, index_key, ts.as_str()],
            Template::Begin => vec![secret, ts.as_str()],
            Template::TransObject { tsid, key, content } => {
                vec![secret, ts.as_str(), key, content, tsid]
            }
            Template::TransKey { tsid, key } => vec![secret, ts.as_str(), key, tsid],
            Template::TransId { tsid } => vec![secret, ts.as_str(), tsid],
        };
        parts.concat()
    }
}

/// Signs `template` with the client secret at `timestamp`.
#[must_use]
pub fn signature(secret: &SecretString, timestamp: Timestamp, template: Template<'_>) -> String {
    sign(&template.text(secret.expose_secret(), timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: Timestamp = 1_700_000_000;

    fn secret() -> SecretString {
        SecretString::from("s3cr3t".to_owned())
    }

    #[test]
    fn sign_matches_known_digests() {
        assert_eq!(
            sign(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sign("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn object_template_orders_time_before_key() {
        let template = Template::Object {
            key: "doc1",
            content: "hello",
        };
        assert_eq!(template.text("s3cr3t", TS), "s3cr3t1700000000doc1hello");
        assert_eq!(
            signature(&secret(), TS, template),
            "5917d52b5dfa55cf5b4021d38dc8c3e4ef4faa5f5b0b6ee9ea44bb8c6774d9fb"
        );
    }

    #[test]
    fn key_template() {
        assert_eq!(
            signature(&secret(), TS, Template::Key { key: "doc1" }),
            "c5b1efd8a27e123492d4cb901db4ce33c084eff03599b9b37cdbb7dcc2bda5de"
        );
    }

    #[test]
    fn category_and_index_list_put_time_last() {
        let category = Template::Category { category: "cat" };
        assert_eq!(category.text("s3cr3t", TS), "s3cr3tcat1700000000");
        assert_eq!(
            signature(&secret(), TS, category),
            "c590b6a9a9b450d56a6554453e7a0ec701cf1668e622edda4d216ece54d75754"
        );
        assert_eq!(
            signature(&secret(), TS, Template::IndexList { index_key: "idx" }),
            "245cfc8326b97a26804c4a2d09be1b00ac30a103cdc0362bff62a6e0569c9e47"
        );
    }

    #[test]
    fn transaction_templates_append_tsid() {
        assert_eq!(
            signature(&secret(), TS, Template::Begin),
            "dbb1f9bf5cd45627769ab60bdb17513828cb86dd6e71f9fb400150d11ebf659a"
        );
        assert_eq!(
            signature(
                &secret(),
                TS,
                Template::TransObject {
                    tsid: "ts-1",
                    key: "doc1",
                    content: "hello",
                }
            ),
            "aa5eabb4e4dbabb108b57021a9848160cad1d0649e9b5ca3df874905a2d8b0ea"
        );
        assert_eq!(
            signature(
                &secret(),
                TS,
                Template::TransKey {
                    tsid: "ts-1",
                    key: "doc1",
                }
            ),
            "0d1eab8a96d76bff3dd254351e8959291b08735b8a657d56be893397c0d174d0"
        );
        assert_eq!(
            signature(&secret(), TS, Template::TransId { tsid: "ts-1" }),
            "68bc6b879936c93fb261a6df45c15821f1ce646077068ec23f49ac84a45d27e9"
        );
    }
}
