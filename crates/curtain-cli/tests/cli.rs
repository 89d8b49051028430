use std::process::Command;

fn curtain(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_curtain"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_calc_stdout_is_json() {
    let output = curtain(&[
        "calc", "--width", "5000", "--height", "2500", "--roll", "1900=4", "--unit", "cm",
    ]);
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["solution"]["fabric_width"], 1900);
    assert_eq!(result["solution"]["part_count"], 3);

    let progress = String::from_utf8_lossy(&output.stderr);
    assert!(progress.contains("Results"));
}

#[test]
fn test_calc_without_solution_fails() {
    let output = curtain(&["calc", "--width", "5000", "--height", "2500", "--roll", "1900=2"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
