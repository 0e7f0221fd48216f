pub mod chain;
pub mod error;
pub mod guardian;
pub mod layout;
pub mod registry;
pub mod signature;
pub mod utils;
pub mod vaa;

pub use chain::Chain;
pub use error::{CryptoError, LayoutError, RegistryError, RepairError};
pub use guardian::{quorum, repair, GuardianSet, Signer};
pub use registry::{payload_literal, Registry};
pub use signature::Signature;
pub use vaa::{GuardianSignature, Vaa};
