mod client;

pub use client::WikidataClient;
