// Copyright (C) 2020-2026  The Blockhouse Technology Limited (TBTL).
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public
// License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Signing and verification of documents as compact JWTs.

use bh_vc_jws::{
    CompactJws, HasJwkKid, JwkPublic, JwsHeader, SignatureError, SignatureVerifier, Signer,
    SigningAlgorithm,
};
use bherror::traits::{ErrorContext as _, ForeignError as _, PropagateError as _};

use crate::{Credential, Error, JwtClaims, Presentation, Result, Verifiable};

/// Outcome of a signature verification which did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification<T = Verifiable> {
    /// The signature is valid, and the token carried the given value.
    Verified(T),
    /// The signature does not match the token and the public key.
    SignatureInvalid,
}

impl<T> Verification<T> {
    /// Whether the signature was valid.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }

    /// The verified value, or [`None`] when the signature was invalid.
    pub fn into_verified(self) -> Option<T> {
        match self {
            Self::Verified(value) => Some(value),
            Self::SignatureInvalid => None,
        }
    }

    fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Verification<U>> {
        match self {
            Self::Verified(value) => f(value).map(Verification::Verified),
            Self::SignatureInvalid => Ok(Verification::SignatureInvalid),
        }
    }
}

/// Signs documents as compact JWTs with a borrowed [`Signer`].
///
/// The envelope projects the document to a [`JwtClaims`] set, puts `alg`,
/// `kid` and `typ` in the header and hands the JWS signing input to the
/// signer. The algorithm defaults to [`SigningAlgorithm::Es256k`] and must
/// match the algorithm of the signer.
///
/// Signing works on a copy of the document, which is never modified.
pub struct SigningEnvelope<'a, S: Signer + ?Sized> {
    signer: &'a S,
    kid: String,
    algorithm: SigningAlgorithm,
    nonce: Option<String>,
    base_claims: Option<JwtClaims>,
}

impl<'a, S: Signer + ?Sized> SigningEnvelope<'a, S> {
    /// An envelope signing with `signer`, announcing `kid` in the header.
    pub fn new(signer: &'a S, kid: impl Into<String>) -> Self {
        Self {
            signer,
            kid: kid.into(),
            algorithm: SigningAlgorithm::default(),
            nonce: None,
            base_claims: None,
        }
    }

    /// An envelope signing with `signer`, announcing its own key ID.
    pub fn for_signer(signer: &'a S) -> Self
    where
        S: HasJwkKid,
    {
        Self::new(signer, signer.jwk_kid())
    }

    /// Override the signing algorithm.
    pub fn with_algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the `nonce` claim of every signed token.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Start every claims set from `base_claims`.
    ///
    /// Claims projected from the document take precedence over the base ones.
    pub fn with_base_claims(mut self, base_claims: JwtClaims) -> Self {
        self.base_claims = Some(base_claims);
        self
    }

    /// Sign the given document, returning the compact JWT.
    pub fn sign(&self, document: &Verifiable) -> Result<String> {
        let claims = document.to_claims(self.nonce.as_deref(), self.base_claims.clone())?;
        self.sign_claims(&claims)
    }

    /// Sign the given credential, returning the compact JWT.
    pub fn sign_credential(&self, credential: &Credential) -> Result<String> {
        let claims = credential.to_claims(self.nonce.as_deref(), self.base_claims.clone())?;
        self.sign_claims(&claims)
    }

    /// Sign the given presentation, returning the compact JWT.
    pub fn sign_presentation(&self, presentation: &Presentation) -> Result<String> {
        let claims = presentation.to_claims(self.nonce.as_deref(), self.base_claims.clone())?;
        self.sign_claims(&claims)
    }

    fn sign_claims(&self, claims: &JwtClaims) -> Result<String> {
        let payload = serde_json::to_value(claims)
            .foreign_err(|| Error::ClaimsSerialization)
            .ctx(|| "unable to serialize the claims set")?;

        let header = JwsHeader::new(self.algorithm, Some(self.kid.as_str()));
        let jws = CompactJws::sign(&header, &payload, self.signer).match_err(signing_error)?;

        tracing::debug!(alg = %self.algorithm, kid = %self.kid, "signed JWT");

        Ok(jws.into_string())
    }
}

fn signing_error(error: &SignatureError) -> Error {
    match error {
        SignatureError::AlgorithmMismatch(expected, actual) => {
            Error::AlgorithmMismatch(*expected, *actual)
        }
        _ => Error::SigningFailed,
    }
}

fn verification_error(error: &SignatureError) -> Error {
    match error {
        SignatureError::AlgorithmMismatch(expected, actual) => {
            Error::AlgorithmMismatch(*expected, *actual)
        }
        _ => Error::SignatureVerificationFailed,
    }
}

/// Verify the signature of a compact JWT and extract its claims set.
///
/// An invalid signature is reported as [`Verification::SignatureInvalid`],
/// while a malformed token fails with [`Error::TokenParsingFailed`] and a
/// failing backend with [`Error::SignatureVerificationFailed`]. Neither `exp`
/// nor `nbf` is checked.
pub fn verify_claims<V>(
    token: &str,
    verifier: &V,
    public_key: &JwkPublic,
) -> Result<Verification<JwtClaims>>
where
    V: SignatureVerifier + ?Sized,
{
    let jws = CompactJws::parse(token).with_err(|| Error::TokenParsingFailed)?;

    let valid = jws
        .verify_signature(verifier, public_key)
        .match_err(verification_error)?;
    if !valid {
        tracing::debug!(kid = ?jws.header().kid, "JWT signature is invalid");
        return Ok(Verification::SignatureInvalid);
    }

    let claims = jws
        .claims::<JwtClaims>()
        .with_err(|| Error::TokenParsingFailed)
        .ctx(|| "payload is not a JWT claims set")?;

    Ok(Verification::Verified(claims))
}

/// Verify a compact JWT and reconstruct the document it carries.
///
/// See [`verify_claims`] and [`Verifiable::from_claims`] for the failure
/// modes.
pub fn verify<V>(token: &str, verifier: &V, public_key: &JwkPublic) -> Result<Verification>
where
    V: SignatureVerifier + ?Sized,
{
    verify_claims(token, verifier, public_key)?.try_map(Verifiable::from_claims)
}

/// Verify a compact JWT carrying a credential.
///
/// Fails with [`Error::InvalidCredential`] when the token carries no `vc`
/// claim, even if its signature is valid.
pub fn verify_credential<V>(
    token: &str,
    verifier: &V,
    public_key: &JwkPublic,
) -> Result<Verification<Credential>>
where
    V: SignatureVerifier + ?Sized,
{
    verify_claims(token, verifier, public_key)?.try_map(Credential::from_claims)
}

/// Verify a compact JWT carrying a presentation.
///
/// Fails with [`Error::InvalidPresentation`] when the token carries no `vp`
/// claim, even if its signature is valid.
pub fn verify_presentation<V>(
    token: &str,
    verifier: &V,
    public_key: &JwkPublic,
) -> Result<Verification<Presentation>>
where
    V: SignatureVerifier + ?Sized,
{
    verify_claims(token, verifier, public_key)?.try_map(Presentation::from_claims)
}

impl Credential {
    /// Sign the credential with the default algorithm, returning the compact
    /// JWT.
    ///
    /// Use a [`SigningEnvelope`] for more control over the produced token.
    pub fn sign<S>(&self, signer: &S, kid: &str, nonce: Option<&str>) -> Result<String>
    where
        S: Signer + ?Sized,
    {
        let mut envelope = SigningEnvelope::new(signer, kid);
        envelope.nonce = nonce.map(str::to_owned);
        envelope.sign_credential(self)
    }
}

impl Presentation {
    /// Sign the presentation with the default algorithm, returning the
    /// compact JWT.
    ///
    /// Time-related claims such as `exp`, `nbf` or `aud` are only carried
    /// when given through `base_claims`.
    pub fn sign<S>(
        &self,
        signer: &S,
        kid: &str,
        nonce: Option<&str>,
        base_claims: Option<JwtClaims>,
    ) -> Result<String>
    where
        S: Signer + ?Sized,
    {
        let mut envelope = SigningEnvelope::new(signer, kid);
        envelope.nonce = nonce.map(str::to_owned);
        envelope.base_claims = base_claims;
        envelope.sign_presentation(self)
    }
}
