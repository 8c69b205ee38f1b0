pub mod care;
pub mod earnings;
pub mod emotion;
pub mod error;
pub mod genetics;
pub mod lifecycle;
pub mod traits;

pub use care::{apply_interaction, decay, DecayConfig, Interaction};
pub use earnings::{EarningsConfig, EarningsProjection, RetirementTier};
pub use emotion::{classify, EmotionSignals, EmotionalState};
pub use error::{PetError, Result};
pub use genetics::{
    breeding_eligibility, breeding_success_rate, preview_offspring, viability,
    BreedingEligibility, BreedingFormula, BreedingStatus, BreedingViability, GeneticsConfig,
    OffspringPreview, RarityTier,
};
pub use lifecycle::{lifecycle_info, LifecycleInfo, LifecycleStage};
pub use traits::{generate, parse_identifier, Coloring, Personality, Traits};
