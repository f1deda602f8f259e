// Copyright 2025 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! End-to-end parses of realistic descriptor text for each registered
//! architecture.

use cpuinfo_engine::{Architecture, ErrorCode, build, canonicalize, parse};

const X86_64_TWO_CPUS: &str = "\
processor\t: 0
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 45
model name\t: Intel(R) Xeon(R) CPU E5-2630 0 @ 2.30GHz
stepping\t: 7
microcode\t: 0x710
cpu MHz\t\t: 1200.000
cache size\t: 15360 KB
physical id\t: 0
core id\t\t: 0
flags\t\t: fpu vme de pse tsc msr pae mce cx8
power management:

processor\t: 1
vendor_id\t: GenuineIntel
cpu family\t: 6
model\t\t: 45
model name\t: Intel(R) Xeon(R) CPU E5-2630 0 @ 2.30GHz
stepping\t: 7
microcode\t: 0x710
cpu MHz\t\t: 2300.000
cache size\t: 15360 KB
physical id\t: 0
core id\t\t: 1
flags\t\t: fpu vme de pse tsc msr pae mce cx8
power management:
";

const AARCH64_MUSTANG: &str = "\
Processor\t: AArch64 Processor rev 0 (aarch64)
processor\t: 0
processor\t: 1
processor\t: 2
processor\t: 3
processor\t: 4
processor\t: 5
processor\t: 6
processor\t: 7
Features\t: fp asimd evtstrm
CPU implementer\t: 0x50
CPU architecture: AArch64
CPU variant\t: 0x0
CPU part\t: 0x000
CPU revision\t: 0

Hardware\t: APM X-Gene Mustang board
";

const PPC64_QEMU: &str = "\
processor\t: 0
cpu\t\t: POWER8E (raw), altivec supported
clock\t\t: 3690.000000MHz
revision\t: 2.1 (pvr 004b 0201)

processor\t: 8
cpu\t\t: POWER8E (raw), altivec supported
clock\t\t: 3690.000000MHz
revision\t: 2.1 (pvr 004b 0201)

timebase\t: 512000000
platform\t: pSeries
model\t\t: IBM pSeries (emulated by qemu)
machine\t\t: CHRP IBM pSeries (emulated by qemu)
";

fn common<'a>(model: &'a cpuinfo_engine::DialectModel, key: &str) -> Option<&'a str> {
    model.common().get(key).map(|s| s.as_str())
}

#[test]
fn test_generic_round_trip_scenario() {
    let text = "processor : 0\nmodel name : Foo\nprocessor : 1\nmodel name : Foo\n";
    let model = build("x86_64", text).unwrap();

    assert_eq!(model.unit_count(), 2);
    for unit in model.units() {
        assert_eq!(unit.get("model_name"), Some("Foo"));
    }
    assert_eq!(model.common().len(), 1);
    assert_eq!(common(&model, "model_name"), Some("Foo"));
    assert_eq!(common(&model, "processor"), None);
}

#[test]
fn test_divergent_field_scenario() {
    let text = "processor : 0\nmodel name : Foo\nprocessor : 1\nmodel name : Bar\n";
    let model = build("x86_64", text).unwrap();

    assert_eq!(model.unit_count(), 2);
    assert!(model.common().is_empty());
    assert_eq!(model.units()[0].get("model_name"), Some("Foo"));
    assert_eq!(model.units()[1].get("model_name"), Some("Bar"));
}

#[test]
fn test_x86_64() {
    let model = build("x86_64", X86_64_TWO_CPUS).unwrap();

    assert_eq!(model.architecture(), Architecture::X86_64);
    assert_eq!(model.unit_count(), 2);
    assert!(model.other().is_empty());

    assert_eq!(
        model.model_name(),
        Some("Intel(R) Xeon(R) CPU E5-2630 0 @ 2.30GHz")
    );
    assert_eq!(model.model(), Some("45"));
    assert_eq!(model.numeric("model"), Some(45));
    assert_eq!(model.numeric("microcode"), Some(0x710));
    assert_eq!(common(&model, "power_management"), Some(""));
    assert_eq!(common(&model, "cache_size"), Some("15360 KB"));

    // per-unit values don't leak into common
    for key in ["processor", "cpu_mhz", "core_id"] {
        assert!(!model.common().contains_key(key), "{key} should diverge");
    }
    assert_eq!(model.units()[1].get("cpu_mhz"), Some("2300.000"));
    assert_eq!(model.units()[0].get("core_id"), Some("0"));
}

#[test]
fn test_x86_64_leading_annotation_goes_to_other() {
    let text = format!("hardware description : lab box\n{X86_64_TWO_CPUS}");
    let model = build("x86_64", &text).unwrap();

    assert_eq!(model.unit_count(), 2);
    assert_eq!(
        model.other(),
        &[(canonicalize("hardware description"), "lab box".to_owned())]
    );
    assert_eq!(model, build("x86_64", X86_64_TWO_CPUS).unwrap());
}

#[test]
fn test_aarch64() {
    let model = build("aarch64", AARCH64_MUSTANG).unwrap();

    assert_eq!(model.unit_count(), 8);
    assert_eq!(model.model_name(), Some("AArch64 Processor rev 0 (aarch64)"));
    assert_eq!(model.model(), Some("0x000"));
    assert_eq!(model.numeric("cpu_implementer"), Some(0x50));
    assert_eq!(model.numeric("cpu_part"), Some(0));
    assert_eq!(model.numeric("cpu_revision"), Some(0));

    assert_eq!(
        model.other(),
        &[(
            canonicalize("Hardware"),
            "APM X-Gene Mustang board".to_owned()
        )]
    );
    assert!(!model.common().contains_key("processor"));
    assert!(!model.common().contains_key("hardware"));
    assert_eq!(model.common().len(), 7);

    for (i, unit) in model.units().iter().enumerate() {
        assert_eq!(unit.get("processor"), Some(i.to_string().as_str()));
        assert_eq!(unit.get("features"), Some("fp asimd evtstrm"));
        assert_eq!(unit.get("cpu_architecture"), Some("AArch64"));
        assert!(!unit.contains_key("hardware"));
        // the shared set plus the unit's own processor number
        assert_eq!(unit.len(), model.common().len() + 1);
    }
}

#[test]
fn test_ppc64_sentinel_terminated() {
    for arch in ["ppc64", "ppc64le"] {
        let model = build(arch, PPC64_QEMU).unwrap();

        assert_eq!(model.unit_count(), 2);
        assert_eq!(model.units()[1].get("processor"), Some("8"));
        assert_eq!(model.units()[0].get("clock"), Some("3690.000000MHz"));

        assert_eq!(model.common().len(), 3);
        assert_eq!(common(&model, "platform"), Some("pSeries"));
        assert_eq!(model.model(), Some("IBM pSeries (emulated by qemu)"));
        assert_eq!(
            model.model_name(),
            Some("CHRP IBM pSeries (emulated by qemu)")
        );
        assert!(!model.common().contains_key("timebase"));
        assert!(model.units().iter().all(|u| !u.contains_key("timebase")));
        assert!(model.units().iter().all(|u| !u.contains_key("platform")));
    }
}

#[test]
fn test_ppc64_leading_annotation_goes_to_other() {
    let text = format!("note : x\n{PPC64_QEMU}");
    let model = build("ppc64", &text).unwrap();

    assert_eq!(model.other(), &[(canonicalize("note"), "x".to_owned())]);
    assert_eq!(model.unit_count(), 2);
    assert!(!model.common().contains_key("note"));
    assert!(model.units().iter().all(|u| !u.contains_key("note")));
    assert_eq!(model, build("ppc64", PPC64_QEMU).unwrap());
}

#[test]
fn test_ppc64_trailing_duplicates_last_write_wins() {
    let text = "processor : 0\ntimebase : 1\nplatform : a\nplatform : b\n";
    let model = parse(Architecture::Ppc64, text);
    assert_eq!(common(&model, "platform"), Some("b"));
}

#[test]
fn test_no_colon_lines() {
    let text = "just some text\nwithout separators\n\n";
    for arch in Architecture::ALL {
        let model = parse(arch, text);
        assert_eq!(model.unit_count(), 0);
        assert!(model.common().is_empty());
        assert!(model.other().is_empty());
    }
}

#[test]
fn test_unsupported_architecture() {
    let err = build("s390x", X86_64_TWO_CPUS).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedArchitecture);
    assert_eq!(
        err.to_string(),
        "DialectError{unsupported_architecture: s390x}"
    );
}

#[test]
fn test_parses_are_independent_across_threads() {
    let handles: Vec<_> = Architecture::ALL
        .into_iter()
        .map(|arch| {
            std::thread::spawn(move || {
                let text = match arch {
                    Architecture::X86_64 => X86_64_TWO_CPUS,
                    Architecture::Aarch64 => AARCH64_MUSTANG,
                    Architecture::Ppc64 | Architecture::Ppc64le => PPC64_QEMU,
                };
                parse(arch, text).unit_count()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![2, 8, 2, 2]);
}

#[test]
fn test_json_report() {
    let model = build("aarch64", AARCH64_MUSTANG).unwrap();
    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["architecture"], "aarch64");
    assert_eq!(json["count"], 8);
    assert_eq!(json["common"]["cpu_implementer"], "0x50");
    assert_eq!(json["other"][0][1], "APM X-Gene Mustang board");
}

#[test]
fn test_facts() {
    let model = build("ppc64le", PPC64_QEMU).unwrap();
    let facts = model.to_facts("cpu");
    assert_eq!(facts.get("cpu.count").map(|s| s.as_str()), Some("2"));
    assert_eq!(
        facts.get("cpu.common.machine").map(|s| s.as_str()),
        Some("CHRP IBM pSeries (emulated by qemu)")
    );
    assert_eq!(
        facts.get("cpu.unit.1.processor").map(|s| s.as_str()),
        Some("8")
    );
}
