mod envelope;

pub use envelope::MessageEnvelope;
