//! Admission pricing rules.
//!
//! Children up to the configured age limit enter free; everyone else owes
//! the flat event fee.

/// Admission pricing for one event edition.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    /// Flat admission fee in cents.
    pub fee_cents: i64,
    /// Participants this age or younger enter free.
    pub free_age_limit: i32,
}

impl AdmissionPolicy {
    pub fn new(fee_cents: i64, free_age_limit: i32) -> Self {
        Self {
            fee_cents,
            free_age_limit,
        }
    }

    /// Whether a participant of the given age enters free.
    pub fn is_free(&self, age: i32) -> bool {
        age <= self.free_age_limit
    }

    /// Amount owed by a participant of the given age, in cents.
    pub fn amount_due_cents(&self, age: i32) -> i64 {
        if self.is_free(age) {
            0
        } else {
            self.fee_cents
        }
    }
}

impl Default for AdmissionPolicy {
    /// R$ 10,00 with free admission up to age 10, the original event's terms.
    fn default() -> Self {
        Self {
            fee_cents: 1000,
            free_age_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_at_limit_is_free() {
        let policy = AdmissionPolicy::default();
        assert!(policy.is_free(10));
        assert_eq!(policy.amount_due_cents(10), 0);
    }

    #[test]
    fn test_just_over_limit_pays() {
        let policy = AdmissionPolicy::default();
        assert!(!policy.is_free(11));
        assert_eq!(policy.amount_due_cents(11), 1000);
    }

    #[test]
    fn test_newborn_is_free() {
        let policy = AdmissionPolicy::default();
        assert_eq!(policy.amount_due_cents(0), 0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = AdmissionPolicy::new(2500, 5);
        assert!(policy.is_free(5));
        assert_eq!(policy.amount_due_cents(6), 2500);
    }
}
