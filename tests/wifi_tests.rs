//! Wi-Fi credentials through the whole pipeline: payload string, symbol,
//! pixels and back.

use wifi_qr::{
    ECLevel, PayloadError, RenderOptions, Security, WiFiCredential, build_wifi_payload, decode_str,
    encode, parse_wifi_payload, render,
};

fn roundtrip(cred: &WiFiCredential, level: ECLevel) -> String {
    let payload = build_wifi_payload(cred).unwrap();
    let symbol = encode(&payload, level).unwrap();
    let decoded = decode_str(&render(&symbol, RenderOptions::with_scale(4))).unwrap();
    assert_eq!(decoded, payload);
    decoded
}

#[test]
fn test_escaping_matches_wire_format() {
    let cred = WiFiCredential::new("My;Net\"", "p:w", Security::Wpa);
    assert_eq!(
        build_wifi_payload(&cred).unwrap(),
        r#"WIFI:T:WPA;S:My\;Net\";P:p\:w;H:false;;"#
    );
}

#[test]
fn test_credentials_survive_encode_and_decode() {
    let creds = [
        WiFiCredential::new("HomeNetwork", "correct horse battery staple", Security::Wpa),
        WiFiCredential::new(r"a\b;c,d:e", r#""quoted"; pass"#, Security::Wep).with_hidden(true),
        WiFiCredential::open("Coffee Shop Guest"),
        WiFiCredential::new("Café Réseau", "mot de passe", Security::Wpa),
    ];
    for cred in &creds {
        for level in [ECLevel::L, ECLevel::H] {
            let decoded = roundtrip(cred, level);
            let parsed = parse_wifi_payload(&decoded).unwrap();
            assert_eq!(parsed.ssid, cred.ssid);
            assert_eq!(parsed.security, cred.security);
            assert_eq!(parsed.hidden, cred.hidden);
            if cred.security == Security::Open {
                assert!(parsed.password.is_empty());
            } else {
                assert_eq!(parsed.password, cred.password);
            }
        }
    }
}

#[test]
fn test_invalid_credentials_are_rejected() {
    assert_eq!(
        build_wifi_payload(&WiFiCredential::new(" \t", "secret", Security::Wpa)),
        Err(PayloadError::EmptySsid)
    );
    assert_eq!(
        build_wifi_payload(&WiFiCredential::new("Net", "", Security::Wpa)),
        Err(PayloadError::MissingPassword("WPA"))
    );
}
