use serde::{Deserialize, Serialize};

use crate::calculators::rent_assistance::{
    HouseholdType, RentAssistanceEngine, RentAssistanceInput, RentAssistanceResult,
    RentInputError, RentPaymentKind,
};
use crate::calculators::student_payment::{
    ApplicantProfile, PaymentAssessment, ProfileError, StudentPaymentEngine,
};
use crate::policy::{PaymentPolicy, PolicyError, RentAssistancePolicy};

/// Declared housing costs accompanying an assessment. The base payment the
/// supplement rides on comes from the payment assessment itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingCosts {
    pub fortnightly_rent: f64,
    pub payment_kind: RentPaymentKind,
    pub household: HouseholdType,
}

/// Combined outcome the portal renders on the results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionAssessment {
    pub payment: PaymentAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_assistance: Option<RentAssistanceResult>,
}

/// Error raised by the combined assessment facade.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Rent(#[from] RentInputError),
}

/// Facade composing the payment engine and the rent-assistance calculator so
/// callers get one coherent answer: the payment result feeds the supplement's
/// base payment, and the profile's declared income feeds its advisory note.
pub struct AssessmentService {
    payments: StudentPaymentEngine,
    rent: RentAssistanceEngine,
}

impl AssessmentService {
    pub fn new(
        payment_policy: PaymentPolicy,
        rent_policy: RentAssistancePolicy,
    ) -> Result<Self, PolicyError> {
        Ok(Self {
            payments: StudentPaymentEngine::new(payment_policy)?,
            rent: RentAssistanceEngine::new(rent_policy)?,
        })
    }

    pub fn payments(&self) -> &StudentPaymentEngine {
        &self.payments
    }

    pub fn rent(&self) -> &RentAssistanceEngine {
        &self.rent
    }

    /// Assess the payment and, when housing costs were declared, the
    /// supplement on top of it.
    pub fn assess(
        &self,
        profile: &ApplicantProfile,
        housing: Option<&HousingCosts>,
    ) -> Result<TransitionAssessment, AssessmentError> {
        let payment = self.payments.assess(profile)?;

        let rent_assistance = match housing {
            Some(costs) => {
                let input = RentAssistanceInput {
                    fortnightly_rent: costs.fortnightly_rent,
                    payment_kind: costs.payment_kind,
                    household: costs.household,
                    base_payment: Some(payment.fortnightly_payment),
                    personal_income: profile.personal_income,
                };
                Some(self.rent.calculate(&input)?)
            }
            None => None,
        };

        Ok(TransitionAssessment {
            payment,
            rent_assistance,
        })
    }
}
