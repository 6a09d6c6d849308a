//! # Beacon Addresses
//!
//! Every default `did:btc1` document advertises three singleton beacons,
//! one per standard single-key output type, all spendable by the initial key:
//!
//! | id                 | output type | encoding                          |
//! |--------------------|-------------|-----------------------------------|
//! | `#initial_p2pkh`   | legacy      | base58check of HASH160(pubkey)    |
//! | `#initial_p2wpkh`  | segwit v0   | bech32 of HASH160(pubkey)         |
//! | `#initial_p2tr`    | taproot     | bech32m of the tweaked x-only key |
//!
//! The taproot address uses the x-only form of the key as the untweaked
//! internal key with no script tree (BIP-86 style key-path only).

use bitcoin::secp256k1::{PublicKey, Secp256k1};
use bitcoin::{Address, CompressedPublicKey};

use crate::config::{
    Network, BEACON_P2PKH_ID, BEACON_P2TR_ID, BEACON_P2WPKH_ID, BITCOIN_URI_SCHEME,
    SINGLETON_BEACON_TYPE,
};
use crate::identity::document::Service;

/// The three beacon addresses derived from one public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconAddresses {
    pub p2pkh: String,
    pub p2wpkh: String,
    pub p2tr: String,
}

impl BeaconAddresses {
    /// Encodes `public_key` as p2pkh, p2wpkh and p2tr addresses on `network`.
    pub fn derive(public_key: &PublicKey, network: Network) -> Self {
        let params = network.bitcoin_network();
        let compressed = CompressedPublicKey(*public_key);
        let (internal_key, _parity) = public_key.x_only_public_key();

        Self {
            p2pkh: Address::p2pkh(compressed.pubkey_hash(), params).to_string(),
            p2wpkh: Address::p2wpkh(&compressed, params).to_string(),
            p2tr: Address::p2tr(&Secp256k1::verification_only(), internal_key, None, params)
                .to_string(),
        }
    }

    /// The default beacon services, in p2pkh, p2wpkh, p2tr order.
    pub fn into_services(self) -> Vec<Service> {
        [
            (BEACON_P2PKH_ID, self.p2pkh),
            (BEACON_P2WPKH_ID, self.p2wpkh),
            (BEACON_P2TR_ID, self.p2tr),
        ]
        .into_iter()
        .map(|(id, address)| {
            Service::new(
                id,
                SINGLETON_BEACON_TYPE,
                format!("{BITCOIN_URI_SCHEME}{address}"),
            )
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{parse_mnemonic, Btc1Keypair};

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";

    fn key(network: Network) -> PublicKey {
        let mnemonic = parse_mnemonic(TEST_MNEMONIC).unwrap();
        *Btc1Keypair::from_mnemonic(&mnemonic, network)
            .unwrap()
            .public_key()
    }

    #[test]
    fn test_mainnet_p2pkh_vector() {
        // BIP-44 first receive address of the all-"abandon" mnemonic.
        let addrs = BeaconAddresses::derive(&key(Network::Mainnet), Network::Mainnet);
        assert_eq!(addrs.p2pkh, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
    }

    #[test]
    fn test_mainnet_prefixes() {
        let addrs = BeaconAddresses::derive(&key(Network::Mainnet), Network::Mainnet);
        assert!(addrs.p2pkh.starts_with('1'));
        assert!(addrs.p2wpkh.starts_with("bc1q"), "{}", addrs.p2wpkh);
        assert!(addrs.p2tr.starts_with("bc1p"), "{}", addrs.p2tr);
    }

    #[test]
    fn test_testnet_and_signet_share_parameters() {
        let pk = key(Network::Testnet);
        let testnet = BeaconAddresses::derive(&pk, Network::Testnet);
        let signet = BeaconAddresses::derive(&pk, Network::Signet);
        assert_eq!(testnet, signet);
        assert!(testnet.p2pkh.starts_with('m') || testnet.p2pkh.starts_with('n'));
        assert!(testnet.p2wpkh.starts_with("tb1q"));
        assert!(testnet.p2tr.starts_with("tb1p"));
    }

    #[test]
    fn test_regtest_prefixes() {
        let addrs = BeaconAddresses::derive(&key(Network::Regtest), Network::Regtest);
        assert!(addrs.p2wpkh.starts_with("bcrt1q"));
        assert!(addrs.p2tr.starts_with("bcrt1p"));
    }

    #[test]
    fn test_services_layout() {
        let services = BeaconAddresses::derive(&key(Network::Mainnet), Network::Mainnet).into_services();
        let ids: Vec<_> = services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["#initial_p2pkh", "#initial_p2wpkh", "#initial_p2tr"]);
        for service in &services {
            assert_eq!(service.type_, "SingletonBeacon");
            assert!(service.endpoint_uri().unwrap().starts_with("bitcoin:"));
        }
        assert_eq!(
            services[0].endpoint_uri(),
            Some("bitcoin:1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA")
        );
    }
}
