//! Builds the network-agnostic intermediate document shared by both
//! identifier modes.

use bitcoin::secp256k1::PublicKey;

use crate::config::{Network, BTC1_CONTEXT, DID_CORE_CONTEXT, INITIAL_KEY_FRAGMENT};
use crate::identity::beacon::BeaconAddresses;
use crate::identity::document::{IntermediateDocument, Service};

/// Assembles the intermediate document for a new DID.
///
/// All four verification relationships point at `#initialKey`. The service
/// list is `services` verbatim when given, otherwise the three default
/// singleton beacons derived from `public_key` on `network`. The public key
/// is used for nothing else.
pub fn assemble(
    public_key: &PublicKey,
    network: Network,
    services: Option<&[Service]>,
) -> IntermediateDocument {
    let service = match services {
        Some(services) => services.to_vec(),
        None => BeaconAddresses::derive(public_key, network).into_services(),
    };

    let initial_key = || vec![INITIAL_KEY_FRAGMENT.to_string()];

    IntermediateDocument {
        context: vec![DID_CORE_CONTEXT.to_string(), BTC1_CONTEXT.to_string()],
        authentication: initial_key(),
        assertion_method: initial_key(),
        capability_invocation: initial_key(),
        capability_delegation: initial_key(),
        service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{generate_mnemonic, Btc1Keypair};

    fn public_key() -> PublicKey {
        *Btc1Keypair::from_mnemonic(&generate_mnemonic().unwrap(), Network::Mainnet)
            .unwrap()
            .public_key()
    }

    #[test]
    fn test_relationships_reference_initial_key() {
        let doc = assemble(&public_key(), Network::Mainnet, None);
        for relationship in [
            &doc.authentication,
            &doc.assertion_method,
            &doc.capability_invocation,
            &doc.capability_delegation,
        ] {
            assert_eq!(relationship, &vec!["#initialKey".to_string()]);
        }
        assert_eq!(
            doc.context,
            vec!["https://www.w3.org/ns/did/v1", "https://github.com/dcdpr/did-btc1"]
        );
    }

    #[test]
    fn test_default_services_are_three_beacons() {
        let doc = assemble(&public_key(), Network::Regtest, None);
        assert_eq!(doc.service.len(), 3);
        assert!(doc.service[1].endpoint_uri().unwrap().starts_with("bitcoin:bcrt1q"));
    }

    #[test]
    fn test_supplied_services_used_verbatim() {
        let services = vec![
            Service::new("#b", "SingletonBeacon", "bitcoin:tb1qexample"),
            Service::new("#a", "CustomService", "https://example.com"),
        ];
        let doc = assemble(&public_key(), Network::Mainnet, Some(&services));
        assert_eq!(doc.service, services);
    }

    #[test]
    fn test_assembly_is_pure() {
        let pk = public_key();
        assert_eq!(
            assemble(&pk, Network::Signet, None),
            assemble(&pk, Network::Signet, None)
        );
    }
}
