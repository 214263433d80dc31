//! Employee records, matrícula generation and payroll tests

mod common;

use common::{as_admin, as_user, hire, setup_plant};
use predicates::prelude::*;

fn rh(tmp: &tempfile::TempDir) -> assert_cmd::Command {
    as_user(tmp, "ger_rh", "123456")
}

// ============================================================================
// Hiring Tests
// ============================================================================

#[test]
fn test_first_hire_gets_sequence_one() {
    let tmp = setup_plant();

    let matricula = hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");

    assert_eq!(matricula.len(), 6, "unexpected matrícula {matricula}");
    assert!(matricula.starts_with("11001"), "unexpected matrícula {matricula}");
    assert!(matricula.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_sequence_is_global_across_departments() {
    let tmp = setup_plant();

    let first = hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");
    let second = hire(&tmp, "Bruno Lima", "222.222.222-22", "RH", "Coordenador de RH");
    let third = hire(&tmp, "Carla Dias", "333.333.333-33", "ESTOQUE", "Analista");

    assert!(first.starts_with("11001"));
    assert!(second.starts_with("43002"));
    assert!(third.starts_with("22003"));
}

#[test]
fn test_hire_rejects_title_from_other_department() {
    let tmp = setup_plant();

    rh(&tmp)
        .args([
            "emp",
            "new",
            "--name",
            "Ana Souza",
            "--cpf",
            "111.111.111-11",
            "--rg",
            "1",
            "--department",
            "ESTOQUE",
            "--title",
            "Analista de RH",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a job title of"));
}

#[test]
fn test_hire_rejects_duplicate_cpf() {
    let tmp = setup_plant();
    hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");

    rh(&tmp)
        .args([
            "emp",
            "new",
            "--name",
            "Outra Ana",
            "--cpf",
            "111.111.111-11",
            "--rg",
            "2",
            "--department",
            "OPERACIONAL",
            "--title",
            "Operador de Máquinas",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_hire_requires_name() {
    let tmp = setup_plant();

    rh(&tmp)
        .args([
            "emp",
            "new",
            "--cpf",
            "1",
            "--rg",
            "1",
            "--department",
            "RH",
            "--title",
            "Assistente de RH",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing --name"));
}

#[test]
fn test_hire_default_rate_from_catalog() {
    let tmp = setup_plant();
    let matricula = hire(&tmp, "Ana Souza", "111.111.111-11", "FINANCEIRO", "Analista Financeiro");

    let output = rh(&tmp)
        .args(["emp", "show", &matricula, "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["hourly_rate"], 12.5);
    assert_eq!(value["department"], "FINANCEIRO");
}

// ============================================================================
// Listing and Editing Tests
// ============================================================================

#[test]
fn test_list_filters_by_department() {
    let tmp = setup_plant();
    hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");
    hire(&tmp, "Bruno Lima", "222.222.222-22", "RH", "Assistente de RH");

    rh(&tmp)
        .args(["emp", "list", "--department", "rh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bruno Lima"))
        .stdout(predicate::str::contains("Ana Souza").not());
}

#[test]
fn test_show_by_short_id() {
    let tmp = setup_plant();
    let matricula = hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");

    rh(&tmp).args(["emp", "list"]).assert().success();

    rh(&tmp)
        .args(["emp", "show", "@1", "-f", "id"])
        .assert()
        .success()
        .stdout(format!("{matricula}\n"));
}

#[test]
fn test_edit_changes_contact_details() {
    let tmp = setup_plant();
    let matricula = hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");

    rh(&tmp)
        .args(["emp", "edit", &matricula, "--phone", "(11) 9999-1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    rh(&tmp)
        .args(["emp", "show", &matricula])
        .assert()
        .success()
        .stdout(predicate::str::contains("(11) 9999-1234"));
}

#[test]
fn test_edit_without_changes_fails() {
    let tmp = setup_plant();
    let matricula = hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");

    rh(&tmp)
        .args(["emp", "edit", &matricula])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_rm_then_sequence_reuses_freed_number() {
    let tmp = setup_plant();
    hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");
    let second = hire(&tmp, "Bruno Lima", "222.222.222-22", "OPERACIONAL", "Auxiliar de Produção");

    rh(&tmp)
        .args(["emp", "rm", &second, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    let third = hire(&tmp, "Carla Dias", "333.333.333-33", "OPERACIONAL", "Auxiliar de Produção");
    assert!(third.starts_with("11002"), "unexpected matrícula {third}");
}

#[test]
fn test_rm_unknown_matricula() {
    let tmp = setup_plant();

    rh(&tmp)
        .args(["emp", "rm", "999999", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No employee"));
}

#[test]
fn test_titles_lists_catalog() {
    let tmp = setup_plant();

    as_user(&tmp, "func_producao", "123456")
        .args(["emp", "titles", "--department", "OPERACIONAL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Operador de Máquinas"))
        .stdout(predicate::str::contains("Analista de RH").not());
}

// ============================================================================
// Payroll Tests
// ============================================================================

#[test]
fn test_payroll_below_irpf_threshold() {
    let tmp = setup_plant();
    hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");

    let output = rh(&tmp)
        .args(["emp", "payroll", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let slip = &value["payslips"][0];
    // 220h × 6.90
    assert!((slip["gross"].as_f64().unwrap() - 1518.0).abs() < 1e-6);
    assert_eq!(slip["irpf"], 0.0);
    assert!((value["totals"]["net"].as_f64().unwrap() - 1518.0).abs() < 1e-6);
}

#[test]
fn test_payroll_managers_get_no_overtime() {
    let tmp = setup_plant();
    hire(&tmp, "Ana Souza", "111.111.111-11", "FINANCEIRO", "Gerente Financeiro");
    hire(&tmp, "Bruno Lima", "222.222.222-22", "FINANCEIRO", "Analista Financeiro");

    let output = rh(&tmp)
        .args(["emp", "payroll", "--hours", "100", "--overtime", "10", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let slips = value["payslips"].as_array().unwrap();
    let manager = slips.iter().find(|s| s["name"] == "Ana Souza").unwrap();
    let analyst = slips.iter().find(|s| s["name"] == "Bruno Lima").unwrap();

    assert_eq!(manager["overtime_pay"], 0.0);
    // 10h × 12.50 × 1.5
    assert!((analyst["overtime_pay"].as_f64().unwrap() - 187.5).abs() < 1e-6);
}

#[test]
fn test_payroll_table_shows_totals() {
    let tmp = setup_plant();
    hire(&tmp, "Ana Souza", "111.111.111-11", "OPERACIONAL", "Auxiliar de Produção");

    as_admin(&tmp)
        .args(["emp", "payroll"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 1.518,00"));
}
