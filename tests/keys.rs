mod common;

use domain_keys::base::iana::{KeyFamily, SigningAlgorithm};
use domain_keys::base::Name;
use domain_keys::sign::{
    generate, generate_material, Error, GenerateConfig, Key, KeyList,
    ProjectError, PublicKeyRecord, RecordEncoder,
};

use common::init_logging;

/// Composes a presentation format DNSKEY record.
struct Presentation;

impl RecordEncoder for Presentation {
    type Record = String;
    type Error = ();

    fn encode(
        &self,
        inputs: &PublicKeyRecord<'_>,
    ) -> Result<Self::Record, Self::Error> {
        Ok(format!(
            "{}. {} IN DNSKEY {} {} {} ({} octets)",
            inputs.owner,
            inputs.ttl,
            inputs.flags,
            inputs.protocol,
            inputs.algorithm.to_int(),
            inputs.public_key.len(),
        ))
    }
}

#[test]
fn generate_rsasha1() {
    init_logging();
    let key = generate(SigningAlgorithm::RSASHA1, 1024).unwrap();
    assert_eq!(key.algorithm(), Some(SigningAlgorithm::RSASHA1));
    assert_eq!(key.rsa().unwrap().n().num_bits(), 1024);
    assert!(key.owner().is_none());
    assert_eq!(key.ttl(), 0);
    assert_eq!(key.keytag(), 0);
}

#[test]
fn generate_unknown_algorithm() {
    init_logging();
    let res = generate(SigningAlgorithm::from_int(200), 1024);
    assert_eq!(res.unwrap_err(), Error::UnsupportedAlgorithm);
}

#[test]
fn material_into_key() {
    init_logging();
    let config = GenerateConfig::default();
    let material =
        generate_material(KeyFamily::Hmac, 160, &config).unwrap();
    assert_eq!(material.bits(), 160);

    let mut key = Key::new();
    key.set_algorithm(SigningAlgorithm::HMACSHA1);
    assert!(key.set_material(material).is_none());
    assert!(key.is_consistent());
    assert_eq!(key.hmac_size(), 20);
}

#[test]
fn push_and_pop() {
    init_logging();
    let mut list = KeyList::new();
    for tag in [1, 2, 3] {
        let mut key = generate(SigningAlgorithm::HMACSHA256, 256).unwrap();
        key.set_keytag(tag);
        list.push(key).unwrap();
    }
    assert_eq!(list.count(), 3);
    assert_eq!(list.get(0).unwrap().keytag(), 1);
    assert_eq!(list.get(1).unwrap().keytag(), 2);
    assert_eq!(list.get(2).unwrap().keytag(), 3);

    let key = list.pop().unwrap();
    assert_eq!(key.keytag(), 3);
    assert_eq!(key.hmac_size(), 32);
    assert_eq!(list.count(), 2);
}

#[test]
fn inverted_window() {
    let mut key = Key::new();
    key.set_inception(100);
    key.set_expiration(50);
    assert_eq!(key.inception(), 100);
    assert_eq!(key.expiration(), 50);
}

#[test]
fn zone_keys() {
    init_logging();
    let owner = Name::vec_from_str("example.org.").unwrap();
    let mut list = KeyList::new();
    for algorithm in [SigningAlgorithm::RSASHA256, SigningAlgorithm::DSA] {
        let mut key = generate(algorithm, 1024).unwrap();
        key.set_owner(&owner);
        key.set_ttl(86400);
        list.push(key).unwrap();
    }
    let mut tsig = generate(SigningAlgorithm::HMACSHA1, 160).unwrap();
    tsig.set_owner(&owner);
    list.push(tsig).unwrap();

    let records = list
        .iter()
        .map(|key| key.to_record(Presentation))
        .collect::<Vec<_>>();
    assert_eq!(
        records[0].as_deref().unwrap(),
        "example.org. 86400 IN DNSKEY 256 3 8 (132 octets)"
    );
    assert_eq!(
        records[1].as_deref().unwrap(),
        "example.org. 86400 IN DNSKEY 256 3 3 (405 octets)"
    );
    assert_eq!(
        list.last().unwrap().record_inputs(),
        Err(ProjectError::NotPublishable)
    );
}
