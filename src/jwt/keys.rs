use crate::error::Error;
use log::debug;
use pem::{parse, parse_many, Pem};
use pkcs8::spki::SubjectPublicKeyInfoRef;
use pkcs8::{DecodePrivateKey, DecodePublicKey, ObjectIdentifier, PrivateKeyInfo};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{SigningKey as RsaSigningKey, VerifyingKey as RsaVerifyingKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use std::fmt;

use super::constants::{
    PEM_FOREIGN_PRIVATE_KEYS, PEM_PRIVATE_KEY, PEM_PUBLIC_KEY, PEM_RSA_PRIVATE_KEY,
    PEM_RSA_PUBLIC_KEY,
};

const RSA_ENCRYPTION_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// RSA private key used for signing. It is never serialized back out.
#[derive(Clone)]
pub struct PrivateKey {
    signing: RsaSigningKey<Sha256>,
}

impl PrivateKey {
    /// Decodes a PEM-armored PKCS#1 or PKCS#8 RSA private key.
    pub fn from_pem(pem_bytes: &[u8]) -> Result<Self, Error> {
        decode_private_key(pem_bytes)
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.rsa().size() * 8
    }

    /// Returns the matching public key.
    pub fn public_key(&self) -> PublicKey {
        self.rsa().to_public_key().into()
    }

    pub(super) fn signing_key(&self) -> &RsaSigningKey<Sha256> {
        &self.signing
    }

    fn rsa(&self) -> &RsaPrivateKey {
        self.signing.as_ref()
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(inner: RsaPrivateKey) -> Self {
        Self {
            signing: RsaSigningKey::new(inner),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

/// RSA public key used for verification.
#[derive(Clone)]
pub struct PublicKey {
    verifying: RsaVerifyingKey<Sha256>,
}

impl PublicKey {
    /// Decodes a PEM-armored SPKI or PKCS#1 RSA public key.
    pub fn from_pem(pem_bytes: &[u8]) -> Result<Self, Error> {
        decode_public_key(pem_bytes)
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.rsa().size() * 8
    }

    pub(super) fn verifying_key(&self) -> &RsaVerifyingKey<Sha256> {
        &self.verifying
    }

    fn rsa(&self) -> &RsaPublicKey {
        self.verifying.as_ref()
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(inner: RsaPublicKey) -> Self {
        Self {
            verifying: RsaVerifyingKey::new(inner),
        }
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.rsa() == other.rsa()
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}

/// Decodes the first RSA private key block found in `pem_bytes`.
///
/// Blocks with unrelated labels (certificates, parameters) are skipped. The first
/// private key block decides the outcome: a PKCS#8 block carrying another
/// algorithm, or an `EC`/`DSA` private key, is reported as [`Error::KeyType`]
/// rather than skipped. When no block carries a private key label, the DER of
/// the first block is decoded anyway and a failure is [`Error::KeyParse`].
pub fn decode_private_key(pem_bytes: &[u8]) -> Result<PrivateKey, Error> {
    let blocks = parse_pem_blocks(pem_bytes)?;
    for block in &blocks {
        match block.tag() {
            PEM_RSA_PRIVATE_KEY => return parse_rsa_private_pkcs1(block.contents()),
            PEM_PRIVATE_KEY => return parse_rsa_private_pkcs8(block.contents()),
            tag if PEM_FOREIGN_PRIVATE_KEYS.contains(&tag) => {
                return Err(Error::KeyType(format!("expected rsa private key, got {tag}")));
            }
            tag => debug!("skipping pem block with label {tag:?} while loading private key"),
        }
    }

    let first = blocks
        .first()
        .ok_or_else(|| Error::KeyFormat("no pem block found".to_string()))?;
    let der = first.contents();
    let parsed = if PrivateKeyInfo::try_from(der).is_ok() {
        parse_rsa_private_pkcs8(der)
    } else {
        parse_rsa_private_pkcs1(der)
    };
    parsed.map_err(|e| match e {
        Error::KeyParse(message) => Error::KeyParse(format!(
            "pem block {:?} does not hold an rsa private key: {message}",
            first.tag()
        )),
        other => other,
    })
}

/// Decodes the first RSA public key block found in `pem_bytes`.
///
/// A `PUBLIC KEY` block whose algorithm is not rsaEncryption fails with
/// [`Error::KeyType`]. When no block carries a public key label, the DER of the
/// first block is decoded anyway and a failure is [`Error::KeyParse`].
pub fn decode_public_key(pem_bytes: &[u8]) -> Result<PublicKey, Error> {
    let blocks = parse_pem_blocks(pem_bytes)?;
    for block in &blocks {
        match block.tag() {
            PEM_PUBLIC_KEY => return parse_rsa_public_spki(block.contents()),
            PEM_RSA_PUBLIC_KEY => return parse_rsa_public_pkcs1(block.contents()),
            tag => debug!("skipping pem block with label {tag:?} while loading public key"),
        }
    }

    let first = blocks
        .first()
        .ok_or_else(|| Error::KeyFormat("no pem block found".to_string()))?;
    let der = first.contents();
    let parsed = if SubjectPublicKeyInfoRef::try_from(der).is_ok() {
        parse_rsa_public_spki(der)
    } else {
        parse_rsa_public_pkcs1(der)
    };
    parsed.map_err(|e| match e {
        Error::KeyParse(message) => Error::KeyParse(format!(
            "pem block {:?} does not hold an rsa public key: {message}",
            first.tag()
        )),
        other => other,
    })
}

/// Returns at least one block. A malformed block after a well-formed leading
/// block does not fail the input; only the leading block is kept then.
fn parse_pem_blocks(pem_bytes: &[u8]) -> Result<Vec<Pem>, Error> {
    let blocks = match parse_many(pem_bytes) {
        Ok(blocks) => blocks,
        Err(err) => {
            let leading =
                parse(pem_bytes).map_err(|e| Error::KeyFormat(format!("pem parse error: {e}")))?;
            debug!("ignoring pem blocks after {:?}: {err}", leading.tag());
            vec![leading]
        }
    };
    if blocks.is_empty() {
        return Err(Error::KeyFormat("no pem block found".to_string()));
    }
    Ok(blocks)
}

fn parse_rsa_private_pkcs1(der: &[u8]) -> Result<PrivateKey, Error> {
    let key = RsaPrivateKey::from_pkcs1_der(der)
        .map_err(|e| Error::KeyParse(format!("rsa pkcs1 private key error: {e}")))?;
    Ok(key.into())
}

fn parse_rsa_private_pkcs8(der: &[u8]) -> Result<PrivateKey, Error> {
    let info = PrivateKeyInfo::try_from(der)
        .map_err(|e| Error::KeyParse(format!("pkcs8 private key error: {e}")))?;
    ensure_rsa_algorithm(info.algorithm.oid)?;
    let key = RsaPrivateKey::from_pkcs8_der(der)
        .map_err(|e| Error::KeyParse(format!("rsa pkcs8 private key error: {e}")))?;
    Ok(key.into())
}

fn parse_rsa_public_spki(der: &[u8]) -> Result<PublicKey, Error> {
    let info = SubjectPublicKeyInfoRef::try_from(der)
        .map_err(|e| Error::KeyParse(format!("spki public key error: {e}")))?;
    ensure_rsa_algorithm(info.algorithm.oid)?;
    let key = RsaPublicKey::from_public_key_der(der)
        .map_err(|e| Error::KeyParse(format!("rsa spki public key error: {e}")))?;
    Ok(key.into())
}

fn parse_rsa_public_pkcs1(der: &[u8]) -> Result<PublicKey, Error> {
    let key = RsaPublicKey::from_pkcs1_der(der)
        .map_err(|e| Error::KeyParse(format!("rsa pkcs1 public key error: {e}")))?;
    Ok(key.into())
}

fn ensure_rsa_algorithm(oid: ObjectIdentifier) -> Result<(), Error> {
    if oid == RSA_ENCRYPTION_OID {
        Ok(())
    } else {
        Err(Error::KeyType(format!(
            "expected rsaEncryption key, got algorithm {oid}"
        )))
    }
}
