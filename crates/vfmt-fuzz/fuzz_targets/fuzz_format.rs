#![no_main]
use libfuzzer_sys::fuzz_target;
use vfmt_core::{DirectivePolicy, Engine, FormatArg, FormatConfig, FormatError, SpecifierRegistry};

// First byte selects the policy, the next eight pick argument kinds, the rest
// is the template. Any template/argument mix must return without panicking.
fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let (kinds, template) = rest.split_at(rest.len().min(8));

    let args: Vec<FormatArg<'_>> = kinds
        .iter()
        .map(|&k| match k % 6 {
            0 => FormatArg::Int(i32::from(k as i8) * 0x0101_0101),
            1 => FormatArg::UInt(u32::from(k) << 24),
            2 => FormatArg::Char(k),
            3 => FormatArg::bytes(template),
            4 => FormatArg::null_str(),
            _ => FormatArg::Pointer(usize::from(k)),
        })
        .collect();

    let policy = if selector & 1 == 0 {
        DirectivePolicy::Recover
    } else {
        DirectivePolicy::Strict
    };
    let config = FormatConfig::default()
        .with_policy(policy)
        .with_initial_capacity(usize::from(selector >> 1))
        .with_capacity_limit(64 * 1024);

    let registry = SpecifierRegistry::with_builtins();
    let engine = Engine::new(&registry).with_config(config);
    match engine.format_to_vec(template, &args) {
        Ok(out) => {
            if !template.contains(&b'%') {
                assert_eq!(out, template);
            }
        }
        Err(FormatError::Write(_)) => unreachable!("Vec sink never fails"),
        Err(_) => {}
    }
});
