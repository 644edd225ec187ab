use serde::{Deserialize, Serialize};

/// A record of a sealed rule, in rendered form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Certificate {
    /// The name of the axiom or theorem.
    pub goal: String,

    /// The rendered premises, in order.
    pub premises: Vec<String>,

    /// The rendered result.
    pub result: String,

    /// The proof steps as strings, each "<depth> <justification> <predicate>".
    /// None indicates that the result is taken without proof, as for an axiom.
    /// Some(vec![]) indicates a trivial proof requiring no steps.
    pub proof: Option<Vec<String>>,
}

impl Certificate {
    /// Create a new certificate with proof steps
    pub fn new(goal: String, premises: Vec<String>, result: String, proof: Vec<String>) -> Self {
        Certificate {
            goal,
            premises,
            result,
            proof: Some(proof),
        }
    }

    /// Create a certificate for a result that is accepted without proof
    pub fn unproved(goal: String, premises: Vec<String>, result: String) -> Self {
        Certificate {
            goal,
            premises,
            result,
            proof: None,
        }
    }

    /// Check if this certificate has a proof
    pub fn has_proof(&self) -> bool {
        self.proof.is_some()
    }
}

/// A collection of certificates, serialized as JSONL (one certificate per line).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CertificateStore {
    pub certs: Vec<Certificate>,
}

impl CertificateStore {
    pub fn new() -> Self {
        CertificateStore { certs: vec![] }
    }

    pub fn push(&mut self, cert: Certificate) {
        self.certs.push(cert);
    }

    /// Parse a certificate store from JSONL text. Blank lines are skipped.
    pub fn from_jsonl(text: &str) -> Result<CertificateStore, serde_json::Error> {
        let mut certs = Vec::new();
        for line in text.lines() {
            if !line.trim().is_empty() {
                let cert: Certificate = serde_json::from_str(line)?;
                certs.push(cert);
            }
        }
        Ok(CertificateStore { certs })
    }

    /// Serialize the certificate store to JSONL text.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut text = String::new();
        for cert in &self.certs {
            text.push_str(&serde_json::to_string(cert)?);
            text.push('\n');
        }
        Ok(text)
    }

    /// Finds the certificate for a goal by name.
    pub fn get(&self, goal: &str) -> Option<&Certificate> {
        self.certs.iter().find(|cert| cert.goal == goal)
    }
}
