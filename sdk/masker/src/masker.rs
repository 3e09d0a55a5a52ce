//! Secret Masker
//!
//! Holds everything fixed at construction: the prime, the polynomial degree,
//! the security parameter, the roster and the key fields. Masking and
//! unmasking live in `mask.rs` and `unmask.rs`.

use std::sync::Arc;
use veilshare_config::{KeyField, MaskerConfig};
use veilshare_field::{FieldElement, PrimeField, SafePrime};
use veilshare_threshold::{PartyId, PartyJar, Roster, ShamirSharer};
use veilshare_values::{MaskedValue, NamedValues, Value, ValuesClassification};

use crate::error::MaskerError;

/// Jar of per-party masked bundles
pub type MaskedJar = PartyJar<NamedValues<MaskedValue>>;

const DEFAULT_KAPPA: u32 = 40;

/// Settings beyond prime, degree and roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskerOptions {
    /// Statistical security parameter, carried for callers
    pub kappa: u32,
    /// Refuse to unmask unless every roster party contributed
    pub require_full_roster: bool,
    pub ecdsa_key_field: KeyField,
    pub eddsa_key_field: KeyField,
}

impl Default for MaskerOptions {
    fn default() -> Self {
        Self {
            kappa: DEFAULT_KAPPA,
            require_full_roster: false,
            ecdsa_key_field: KeyField::Curve,
            eddsa_key_field: KeyField::Curve,
        }
    }
}

/// Splits named values into per-party bundles and reconstructs them
#[derive(Debug, Clone)]
pub struct SecretMasker {
    prime: SafePrime,
    options: MaskerOptions,
    roster: Arc<Roster>,
    /// Sharer over the safe prime
    pub(crate) sharer: ShamirSharer,
    pub(crate) ecdsa_sharer: ShamirSharer,
    pub(crate) eddsa_sharer: ShamirSharer,
    fingerprint: [u8; 32],
}

impl SecretMasker {
    pub fn new_64_bit_safe_prime(degree: usize, parties: Vec<PartyId>) -> Result<Self, MaskerError> {
        Self::with_options(SafePrime::U64, degree, parties, MaskerOptions::default())
    }

    pub fn new_128_bit_safe_prime(degree: usize, parties: Vec<PartyId>) -> Result<Self, MaskerError> {
        Self::with_options(SafePrime::U128, degree, parties, MaskerOptions::default())
    }

    pub fn new_256_bit_safe_prime(degree: usize, parties: Vec<PartyId>) -> Result<Self, MaskerError> {
        Self::with_options(SafePrime::U256, degree, parties, MaskerOptions::default())
    }

    /// Build a masker from a loaded configuration
    pub fn from_config(config: &MaskerConfig) -> Result<Self, MaskerError> {
        let parties = config
            .party_ids()
            .map_err(|e| MaskerError::InvalidConfig(format!("{e:#}")))?;
        let options = MaskerOptions {
            kappa: config.masker.kappa,
            require_full_roster: config.masker.require_full_roster,
            ecdsa_key_field: config.masker.ecdsa_key_field,
            eddsa_key_field: config.masker.eddsa_key_field,
        };
        Self::with_options(config.masker.prime, config.masker.degree, parties, options)
    }

    /// Build a masker; fails if the roster is empty, has duplicates, or
    /// `degree + 1` exceeds its size
    pub fn with_options(
        prime: SafePrime,
        degree: usize,
        parties: Vec<PartyId>,
        options: MaskerOptions,
    ) -> Result<Self, MaskerError> {
        let invalid = |e: veilshare_threshold::ShamirError| MaskerError::InvalidConfig(e.to_string());

        let roster = Arc::new(Roster::new(parties).map_err(invalid)?);
        let field = PrimeField::safe_prime(prime);

        let key_field = |choice: KeyField, curve: fn() -> PrimeField| match choice {
            KeyField::Curve => curve(),
            KeyField::Masker => field.clone(),
        };
        let ecdsa_field = key_field(options.ecdsa_key_field, PrimeField::secp256k1_order);
        let eddsa_field = key_field(options.eddsa_key_field, PrimeField::ed25519_order);

        let sharer = ShamirSharer::new(field, degree, roster.clone()).map_err(invalid)?;
        let ecdsa_sharer = ShamirSharer::new(ecdsa_field, degree, roster.clone()).map_err(invalid)?;
        let eddsa_sharer = ShamirSharer::new(eddsa_field, degree, roster.clone()).map_err(invalid)?;

        let fingerprint = roster.fingerprint(&binding_context(prime, degree, &options));

        tracing::debug!(
            prime = %prime,
            degree,
            parties = roster.len(),
            "secret masker ready"
        );

        Ok(Self {
            prime,
            options,
            roster,
            sharer,
            ecdsa_sharer,
            eddsa_sharer,
            fingerprint,
        })
    }

    /// Parties in roster order
    pub fn parties(&self) -> &[PartyId] {
        self.roster.parties()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Polynomial degree; `degree + 1` shares reconstruct
    pub fn degree(&self) -> usize {
        self.sharer.degree()
    }

    pub fn kappa(&self) -> u32 {
        self.options.kappa
    }

    pub fn prime(&self) -> SafePrime {
        self.prime
    }

    pub fn options(&self) -> &MaskerOptions {
        &self.options
    }

    /// Field over the safe prime
    pub fn field(&self) -> &PrimeField {
        self.sharer.field()
    }

    pub fn ecdsa_key_field(&self) -> &PrimeField {
        self.ecdsa_sharer.field()
    }

    pub fn eddsa_key_field(&self) -> &PrimeField {
        self.eddsa_sharer.field()
    }

    /// Bytes of blob carried by one field element
    pub fn blob_chunk_size(&self) -> usize {
        self.field().blob_chunk_size()
    }

    /// Evaluation point of `party`
    pub fn abscissa(&self, party: &PartyId) -> Option<FieldElement> {
        self.roster.abscissa(party)
    }

    /// Digest of prime, degree, key fields and roster
    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }

    /// Empty jar for collecting this masker's bundles
    pub fn build_jar(&self) -> MaskedJar {
        PartyJar::new(self.roster.clone(), self.fingerprint)
    }

    /// Count what each party stores for `values`
    pub fn classify_values(&self, values: &NamedValues<Value>) -> ValuesClassification {
        ValuesClassification::classify(values, self.blob_chunk_size())
    }
}

fn binding_context(prime: SafePrime, degree: usize, options: &MaskerOptions) -> Vec<u8> {
    let tag = |field: KeyField| match field {
        KeyField::Curve => 0u8,
        KeyField::Masker => 1u8,
    };
    let mut context = Vec::with_capacity(16);
    context.extend_from_slice(prime.name().as_bytes());
    context.extend_from_slice(&(degree as u64).to_le_bytes());
    context.push(tag(options.ecdsa_key_field));
    context.push(tag(options.eddsa_key_field));
    context
}
