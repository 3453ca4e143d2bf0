use tally_types::{OwnerId, SignatureBytes, Transaction, TypeError};

/// Ed25519 signing key (private).
pub struct SigningKey(ed25519_dalek::SigningKey);

/// Ed25519 verifying key (public).
#[derive(Clone, PartialEq, Eq)]
pub struct VerifyingKey(ed25519_dalek::VerifyingKey);

impl SigningKey {
    /// Generate a new random signing key.
    pub fn generate() -> Self {
        let mut csprng = rand::thread_rng();
        Self(ed25519_dalek::SigningKey::generate(&mut csprng))
    }

    /// Create from raw 32-byte secret.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(&bytes))
    }

    /// The corresponding public verifying key.
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(self.0.verifying_key())
    }

    /// The owner identity outputs assigned to this key carry.
    pub fn owner_id(&self) -> OwnerId {
        self.verifying_key().owner_id()
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> SignatureBytes {
        use ed25519_dalek::Signer;
        SignatureBytes::from_bytes(self.0.sign(message).to_bytes())
    }

    /// Raw secret key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }
}

impl VerifyingKey {
    /// Verify a signature on a message.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &SignatureBytes,
    ) -> Result<(), SignatureError> {
        use ed25519_dalek::Verifier;
        let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
        self.0
            .verify(message, &sig)
            .map_err(|_| SignatureError::InvalidSignature)
    }

    /// The opaque owner identity for this key.
    pub fn owner_id(&self) -> OwnerId {
        OwnerId::from_bytes(self.0.to_bytes())
    }

    /// Recover the verifying key behind an owner identity.
    ///
    /// Fails when the identity bytes are not a valid curve point.
    pub fn from_owner_id(owner: &OwnerId) -> Result<Self, SignatureError> {
        let key = ed25519_dalek::VerifyingKey::from_bytes(owner.as_bytes())
            .map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self(key))
    }

    /// Raw public key bytes.
    pub fn as_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SigningKey(<redacted>)")
    }
}

impl std::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerifyingKey({})", hex::encode(self.0.to_bytes()))
    }
}

/// Verify `signature` over `message` under the key identified by `owner`.
///
/// Pure predicate, no side effects. Owner bytes that do not decode to a
/// valid key verify as `false`: an unverifiable claim is routine
/// invalidity, not a fault.
pub fn verify_signature(owner: &OwnerId, message: &[u8], signature: &SignatureBytes) -> bool {
    match VerifyingKey::from_owner_id(owner) {
        Ok(key) => key.verify(message, signature).is_ok(),
        Err(_) => false,
    }
}

/// Sign the input at `index` of `tx` with `key` and attach the signature.
pub fn sign_input(
    tx: &mut Transaction,
    index: usize,
    key: &SigningKey,
) -> Result<(), SignatureError> {
    let payload = tx.signing_payload(index)?;
    let signature = key.sign(&payload);
    tx.attach_signature(index, signature)?;
    Ok(())
}

/// Errors from signing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid key")]
    InvalidKey,
    #[error(transparent)]
    Type(#[from] TypeError),
}
