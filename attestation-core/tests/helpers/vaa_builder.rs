use attestation_core::guardian::Signer;
use attestation_core::{GuardianSignature, Vaa};

pub struct VaaBuilder {
    vaa: Vaa,
}

impl VaaBuilder {
    pub fn new(vaa: Vaa) -> Self {
        Self { vaa }
    }

    pub fn with_guardian_set_index(mut self, index: u32) -> Self {
        self.vaa.guardian_set_index = index;
        self
    }

    pub fn add_signature(mut self, private_key: &str, guardian_index: u8) -> Self {
        let digest = self.vaa.digest().unwrap();
        let signature = Signer::new(private_key).unwrap().sign(digest).unwrap();
        self.vaa.signatures.push(GuardianSignature {
            guardian_index,
            signature,
        });
        self
    }

    pub fn add_signatures_from_keys(mut self, keys: &[&str]) -> Self {
        for (i, key) in keys.iter().enumerate() {
            self = self.add_signature(key, i as u8);
        }
        self
    }

    pub fn build(self) -> Vaa {
        self.vaa
    }
}

impl Default for VaaBuilder {
    fn default() -> Self {
        Self::new(super::fixtures::create_test_vaa())
    }
}
