//! Shamir Secret Sharing over a Prime Field
//!
//! Implements degree-`t` sharing: a secret `s` becomes the constant term of a
//! random polynomial `f` of degree `t`, and party `i` receives `f(x_i)`. Any
//! `t + 1` shares recover `f(0) = s` by Lagrange interpolation.

use rand::{CryptoRng, RngCore};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use veilshare_field::{FieldElement, PrimeField};

use crate::roster::{PartyId, Roster};

/// One share per party
pub type PartyShares = HashMap<PartyId, FieldElement>;

/// Sharing and reconstruction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShamirError {
    #[error("insufficient shares: got {got}, need {need}")]
    InsufficientShares { got: usize, need: usize },

    #[error("invalid degree: degree={degree}, parties={parties}")]
    InvalidDegree { degree: usize, parties: usize },

    #[error("party roster is empty")]
    EmptyRoster,

    #[error("duplicate party in roster: {0}")]
    DuplicateParty(PartyId),

    #[error("party {0} is not on the roster")]
    UnknownParty(PartyId),

    #[error("share from party {0} is not a field element")]
    InvalidShare(PartyId),

    #[error("share from party {party} does not lie on the interpolated polynomial")]
    Corruption { party: PartyId },

    #[error("reconstructed secret is zero")]
    ZeroSecret,

    #[error("evaluation points collide in the field")]
    CollidingAbscissas,
}

/// A Shamir sharer bound to a field, a degree and a roster
#[derive(Debug, Clone)]
pub struct ShamirSharer {
    field: PrimeField,
    degree: usize,
    roster: Arc<Roster>,
}

impl ShamirSharer {
    /// Create a sharer; `degree + 1` parties must exist to ever reconstruct
    pub fn new(field: PrimeField, degree: usize, roster: Arc<Roster>) -> Result<Self, ShamirError> {
        if degree >= roster.len() {
            return Err(ShamirError::InvalidDegree {
                degree,
                parties: roster.len(),
            });
        }
        Ok(Self {
            field,
            degree,
            roster,
        })
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Minimum number of shares needed to reconstruct
    pub fn threshold(&self) -> usize {
        self.degree + 1
    }

    /// Split `secret` into one share per roster party
    ///
    /// Fresh coefficients are drawn on every call.
    pub fn share<R>(&self, secret: &FieldElement, rng: &mut R) -> PartyShares
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        self.roster
            .parties()
            .iter()
            .cloned()
            .zip(self.share_in_roster_order(secret, rng))
            .collect()
    }

    /// Like [`share`](Self::share), but the i-th share belongs to the i-th roster party
    pub fn share_in_roster_order<R>(&self, secret: &FieldElement, rng: &mut R) -> Vec<FieldElement>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        // f(x) = secret + a1*x + a2*x^2 + ... + at*x^t
        let mut coeffs = Vec::with_capacity(self.degree + 1);
        coeffs.push(self.field.reduce(secret.value()));
        for _ in 0..self.degree {
            coeffs.push(self.field.random(rng));
        }

        (1..=self.roster.len() as u64)
            .map(|x| self.evaluate(&coeffs, &FieldElement::from(x)))
            .collect()
    }

    /// Horner evaluation of `coeffs` (constant term first) at `x`
    fn evaluate(&self, coeffs: &[FieldElement], x: &FieldElement) -> FieldElement {
        coeffs.iter().rev().fold(FieldElement::zero(), |acc, coeff| {
            self.field.add(&self.field.mul(&acc, x), coeff)
        })
    }

    /// Recover `f(0)` from at least `degree + 1` shares
    ///
    /// The first `degree + 1` shares in roster order are interpolated; every
    /// additional share must lie on the same polynomial.
    pub fn reconstruct(&self, shares: &PartyShares) -> Result<FieldElement, ShamirError> {
        if shares.len() < self.threshold() {
            return Err(ShamirError::InsufficientShares {
                got: shares.len(),
                need: self.threshold(),
            });
        }

        let mut points = Vec::with_capacity(shares.len());
        for (party, share) in shares {
            let x = self
                .roster
                .abscissa(party)
                .ok_or_else(|| ShamirError::UnknownParty(party.clone()))?;
            if !self.field.contains(share) {
                return Err(ShamirError::InvalidShare(party.clone()));
            }
            points.push((party, x, share.clone()));
        }
        points.sort_by(|a, b| a.1.cmp(&b.1));

        let (base, extra) = points.split_at(self.threshold());
        let base: Vec<(FieldElement, FieldElement)> = base
            .iter()
            .map(|(_, x, y)| (x.clone(), y.clone()))
            .collect();

        let secret = self.interpolate(&base, &FieldElement::zero())?;

        for (party, x, y) in extra {
            if &self.interpolate(&base, x)? != y {
                return Err(ShamirError::Corruption {
                    party: (*party).clone(),
                });
            }
        }

        Ok(secret)
    }

    /// Like [`reconstruct`](Self::reconstruct), but a zero result is an error
    pub fn reconstruct_nonzero(&self, shares: &PartyShares) -> Result<FieldElement, ShamirError> {
        let secret = self.reconstruct(shares)?;
        if secret.is_zero() {
            return Err(ShamirError::ZeroSecret);
        }
        Ok(secret)
    }

    /// Lagrange interpolation of `points` evaluated at `at`
    ///
    /// `f(at) = Σ y_i * Π_{j≠i} (at - x_j) / (x_i - x_j)`
    fn interpolate(
        &self,
        points: &[(FieldElement, FieldElement)],
        at: &FieldElement,
    ) -> Result<FieldElement, ShamirError> {
        let f = &self.field;
        let mut result = FieldElement::zero();

        for (i, (xi, yi)) in points.iter().enumerate() {
            let mut numerator = FieldElement::one();
            let mut denominator = FieldElement::one();

            for (j, (xj, _)) in points.iter().enumerate() {
                if i != j {
                    numerator = f.mul(&numerator, &f.sub(at, xj));
                    denominator = f.mul(&denominator, &f.sub(xi, xj));
                }
            }

            let basis = f
                .div(&numerator, &denominator)
                .map_err(|_| ShamirError::CollidingAbscissas)?;
            result = f.add(&result, &f.mul(yi, &basis));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use veilshare_field::SafePrime;

    fn sharer(prime: SafePrime, degree: usize, parties: usize) -> ShamirSharer {
        let roster = Roster::new(
            (0..parties)
                .map(|i| PartyId::new(vec![i as u8 + 1]))
                .collect(),
        )
        .unwrap();
        ShamirSharer::new(PrimeField::safe_prime(prime), degree, Arc::new(roster)).unwrap()
    }

    fn subset(shares: &PartyShares, parties: &[u8]) -> PartyShares {
        shares
            .iter()
            .filter(|(p, _)| parties.contains(&p.as_bytes()[0]))
            .map(|(p, s)| (p.clone(), s.clone()))
            .collect()
    }

    #[test]
    fn test_split_and_combine() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let sharer = sharer(SafePrime::U64, 2, 5);
        let secret = FieldElement::from(42);

        let shares = sharer.share(&secret, &mut rng);
        assert_eq!(shares.len(), 5);

        // Reconstruct with exactly threshold shares
        let recovered = sharer.reconstruct(&subset(&shares, &[1, 2, 3])).unwrap();
        assert_eq!(recovered, secret);

        // Reconstruct with different subset of shares
        let recovered = sharer.reconstruct(&subset(&shares, &[2, 4, 5])).unwrap();
        assert_eq!(recovered, secret);

        // All shares, consistency checked
        assert_eq!(sharer.reconstruct(&shares).unwrap(), secret);
    }

    #[test]
    fn test_large_field_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let sharer = sharer(SafePrime::U256, 3, 7);
        let secret = sharer.field().random(&mut rng);

        let shares = sharer.share(&secret, &mut rng);
        assert_eq!(sharer.reconstruct(&shares).unwrap(), secret);
    }

    #[test]
    fn test_fresh_coefficients_per_call() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let sharer = sharer(SafePrime::U64, 1, 3);
        let secret = FieldElement::from(7);

        let first = sharer.share(&secret, &mut rng);
        let second = sharer.share(&secret, &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn test_degree_zero_replicates_secret() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let sharer = sharer(SafePrime::U64, 0, 3);
        let secret = FieldElement::from(99);

        let shares = sharer.share(&secret, &mut rng);
        assert!(shares.values().all(|s| *s == secret));
    }

    #[test]
    fn test_insufficient_shares() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let sharer = sharer(SafePrime::U64, 2, 5);
        let shares = sharer.share(&FieldElement::from(42), &mut rng);

        let result = sharer.reconstruct(&subset(&shares, &[1, 2]));
        assert_eq!(
            result,
            Err(ShamirError::InsufficientShares { got: 2, need: 3 })
        );
    }

    #[test]
    fn test_corrupted_extra_share_detected() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let sharer = sharer(SafePrime::U64, 1, 3);
        let mut shares = sharer.share(&FieldElement::from(42), &mut rng);

        let victim = PartyId::new(vec![3]);
        let tampered = sharer
            .field()
            .add(&shares[&victim], &FieldElement::one());
        shares.insert(victim.clone(), tampered);

        assert_eq!(
            sharer.reconstruct(&shares),
            Err(ShamirError::Corruption { party: victim })
        );
    }

    #[test]
    fn test_unknown_party_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let sharer = sharer(SafePrime::U64, 1, 3);
        let mut shares = sharer.share(&FieldElement::from(1), &mut rng);
        shares.insert(PartyId::from("stranger"), FieldElement::from(5));

        assert!(matches!(
            sharer.reconstruct(&shares),
            Err(ShamirError::UnknownParty(_))
        ));
    }

    #[test]
    fn test_out_of_range_share_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let sharer = sharer(SafePrime::U64, 1, 3);
        let mut shares = sharer.share(&FieldElement::from(1), &mut rng);
        let party = PartyId::new(vec![1]);
        shares.insert(party.clone(), FieldElement(sharer.field().modulus().clone()));

        assert_eq!(
            sharer.reconstruct(&shares),
            Err(ShamirError::InvalidShare(party))
        );
    }

    #[test]
    fn test_reconstruct_nonzero() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let sharer = sharer(SafePrime::U64, 1, 3);

        let zero_shares = sharer.share(&FieldElement::zero(), &mut rng);
        assert_eq!(
            sharer.reconstruct_nonzero(&zero_shares),
            Err(ShamirError::ZeroSecret)
        );

        let shares = sharer.share(&FieldElement::from(5), &mut rng);
        assert_eq!(
            sharer.reconstruct_nonzero(&shares).unwrap(),
            FieldElement::from(5)
        );
    }

    #[test]
    fn test_invalid_degree() {
        let roster = Arc::new(
            Roster::new(vec![PartyId::from("a"), PartyId::from("b")]).unwrap(),
        );
        let field = PrimeField::safe_prime(SafePrime::U64);

        // degree + 1 > n
        assert!(matches!(
            ShamirSharer::new(field.clone(), 2, roster.clone()),
            Err(ShamirError::InvalidDegree { .. })
        ));
        assert!(ShamirSharer::new(field, 1, roster).is_ok());
    }
}
