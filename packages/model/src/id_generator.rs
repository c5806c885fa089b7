use std::collections::HashSet;

use crc32fast::Hasher;

/// Derive a short stable document id from a document key using CRC32
pub fn get_document_id(key: &str) -> String {
    let mut buff = String::from(key);
    if !key.starts_with("mindplan://") {
        buff = format!("mindplan://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential node id generator for one editing session
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u32,
    reserved: HashSet<String>,
}

impl IDGenerator {
    pub fn new(key: &str) -> Self {
        Self::from_seed(get_document_id(key))
    }

    /// Generator whose seed also mixes in a per-session nonce, so two sessions
    /// on the same document do not hand out the same ids.
    pub fn for_session(key: &str, nonce: u64) -> Self {
        Self::from_seed(get_document_id(&format!("{}#{}", key, nonce)))
    }

    pub fn from_seed(seed: String) -> Self {
        Self {
            seed,
            count: 0,
            reserved: HashSet::new(),
        }
    }

    /// Mark ids that already exist; `new_id` never returns them
    pub fn reserve<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(ids.into_iter().map(Into::into));
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        loop {
            self.count += 1;
            let id = format!("{}-{}", self.seed, self.count);
            if !self.reserved.contains(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
