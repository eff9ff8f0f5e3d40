// Corpus — the known-author documents of one problem.
//
// Identity is content-derived: the SHA-256 of every document, each prefixed
// with its byte length, in order. Equal documents in equal order give equal
// digests regardless of where the corpus came from.

use sha2::{Digest, Sha256};

/// Hex-encoded content digest of a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CorpusDigest(String);

impl CorpusDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered, immutable sequence of known documents.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<String>,
    digest: CorpusDigest,
}

impl Corpus {
    pub fn new(documents: Vec<String>) -> Self {
        let digest = digest_documents(&documents);
        Self { documents, digest }
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn digest(&self) -> &CorpusDigest {
        &self.digest
    }
}

impl<S: Into<String>> FromIterator<S> for Corpus {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

fn digest_documents(documents: &[String]) -> CorpusDigest {
    let mut hasher = Sha256::new();
    hasher.update((documents.len() as u64).to_le_bytes());
    for document in documents {
        hasher.update((document.len() as u64).to_le_bytes());
        hasher.update(document.as_bytes());
    }
    CorpusDigest(hex::encode(hasher.finalize()))
}
