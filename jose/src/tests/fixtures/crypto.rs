use crate::{
    crypto::{
        fixed_key_bytes, JsonWebSigningKey, JsonWebValidatingKey, OctetKeyPortable,
        SignatureAlgorithm,
    },
    error::{Error, Result},
    jwk::Curve,
};

/// A stand-in Ed25519-shaped public key. Its "signatures" are a keyed
/// checksum, good enough to tell a matching key and input from anything
/// else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestPublicKey(pub [u8; 32]);

/// Private half of [`TestPublicKey`]; the public key is every byte inverted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestPrivateKey(pub [u8; 32]);

impl TestPrivateKey {
    pub fn public_key(&self) -> TestPublicKey {
        TestPublicKey(self.0.map(|byte| !byte))
    }
}

fn checksum(public: &[u8; 32], data: &[u8]) -> Vec<u8> {
    let mut out = public.to_vec();
    for (index, byte) in data.iter().enumerate() {
        let slot = index % out.len();
        out[slot] = out[slot].rotate_left(3) ^ byte;
    }
    out.extend_from_slice(&(data.len() as u64).to_be_bytes());
    out
}

impl OctetKeyPortable for TestPublicKey {
    const CURVE: Curve = Curve::Ed25519;

    fn raw_representation(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_raw_representation(raw: &[u8]) -> Result<Self> {
        Ok(TestPublicKey(fixed_key_bytes(raw)?))
    }
}

impl OctetKeyPortable for TestPrivateKey {
    const CURVE: Curve = Curve::Ed25519;
    const IS_PRIVATE: bool = true;

    fn raw_representation(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    fn from_raw_representation(raw: &[u8]) -> Result<Self> {
        Ok(TestPrivateKey(fixed_key_bytes(raw)?))
    }

    fn public_raw_representation(&self) -> Option<Vec<u8>> {
        Some(self.public_key().raw_representation())
    }
}

impl JsonWebValidatingKey for TestPublicKey {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::EdDSA
    }

    fn verify_signature(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        match checksum(&self.0, data) == signature {
            true => Ok(()),
            false => Err(Error::AuthenticationFailure),
        }
    }
}

impl JsonWebValidatingKey for TestPrivateKey {
    fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::EdDSA
    }

    fn verify_signature(&self, signature: &[u8], data: &[u8]) -> Result<()> {
        self.public_key().verify_signature(signature, data)
    }
}

impl JsonWebSigningKey for TestPrivateKey {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(checksum(&self.public_key().0, data))
    }
}

pub fn alice_key() -> TestPrivateKey {
    TestPrivateKey([0x11; 32])
}

pub fn mallory_key() -> TestPrivateKey {
    let mut raw = [0u8; 32];
    for (index, byte) in raw.iter_mut().enumerate() {
        *byte = index as u8;
    }
    TestPrivateKey(raw)
}
