//! 请求/应答边界测试

mod common;

use std::io::Write;

use common::{SimArm, command_ids, pose_at, ptp_frames, ptp_target};
use dobot_client::{PtpMode, Request, Response, SerialError, SessionConfig, execute};
use dobot_protocol::CommandId;
use dobot_serial::MockTransport;

fn run(arm: &SimArm, json: &str) -> (Response, dobot_serial::MockHandle) {
    let (mock, handle) = arm.transport();
    let request = Request::from_json(json).unwrap();
    let response = execute(&request, &SessionConfig::immediate(), move |_| Ok(mock));
    (response, handle)
}

#[test]
fn test_unknown_command() {
    let mut opened = false;
    let request = Request::from_json(r#"{"command":"dance","port":"/dev/ttyUSB0"}"#).unwrap();

    let response = execute(&request, &SessionConfig::immediate(), |_| {
        opened = true;
        Ok(MockTransport::new())
    });

    assert!(!response.success);
    assert_eq!(response.msg, "Unknown command");
    assert_eq!(response.to_json(), r#"{"success":false,"msg":"Unknown command"}"#);
    assert!(!opened);
}

#[test]
fn test_init() {
    let arm = SimArm::new(pose_at(200.0, 0.0, 150.0, 0.0));
    let (response, handle) = run(&arm, r#"{"command":"init","port":"COM3"}"#);

    assert_eq!(response, Response::success("Dobot initialized"));
    assert_eq!(
        command_ids(&handle),
        vec![
            CommandId::ClearAllAlarmsState,
            CommandId::SetArmEnabled,
            CommandId::SetPtpCommonParams,
            CommandId::SetQueuedCmdStartExec,
        ]
    );
    assert!(!handle.is_open());
}

#[test]
fn test_init_failure_message() {
    let arm = SimArm::new(pose_at(200.0, 0.0, 150.0, 0.0));
    let (mock, handle) = arm.transport();
    handle.set_fail_writes(true);
    let request = Request::new("init").with_port("COM3");

    let response = execute(&request, &SessionConfig::immediate(), move |_| Ok(mock));
    assert!(!response.success);
    assert!(response.msg.starts_with("Init failure:"), "{}", response.msg);
}

#[test]
fn test_move_with_defaults() {
    let arm = SimArm::new(pose_at(100.0, 0.0, 50.0, 0.0));
    let (response, handle) = run(&arm, r#"{"command":"move","port":"COM3","x":220}"#);

    assert_eq!(response, Response::success("Movement complete"));
    let ptp = ptp_frames(&handle);
    assert_eq!(ptp.len(), 1);
    assert_eq!(
        ptp_target(&ptp[0]),
        (u8::from(PtpMode::MovlXyz), 220.0, 0.0, 150.0, 0.0)
    );
}

#[test]
fn test_home() {
    let arm = SimArm::new(pose_at(100.0, 0.0, 50.0, 0.0));
    let (response, handle) = run(&arm, r#"{"command":"home","port":"COM3"}"#);

    assert_eq!(response, Response::success("Homing complete"));
    assert_eq!(ptp_frames(&handle).len(), 2);
    assert_eq!(arm.pose().z, 120.0);
}

#[test]
fn test_stop() {
    let arm = SimArm::new(pose_at(100.0, 0.0, 50.0, 0.0));
    let (response, handle) = run(&arm, r#"{"command":"stop","port":"COM3"}"#);

    assert_eq!(response.to_json(), r#"{"success":true,"msg":"Stopped"}"#);
    assert_eq!(command_ids(&handle), vec![CommandId::SetQueuedCmdStopExec]);
}

#[test]
fn test_pose_returns_data() {
    let arm = SimArm::new(pose_at(210.0, 1.0, 2.0, 3.0));
    let (response, _handle) = run(&arm, r#"{"command":"pose","port":"COM3"}"#);

    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data["x"], 210.0);
    assert_eq!(data["r"], 3.0);
    assert_eq!(data["j4"], 0.0);
}

#[test]
fn test_pose_unavailable() {
    let arm = SimArm::new(pose_at(210.0, 1.0, 2.0, 3.0));
    arm.set_corrupt_replies(true);
    let (response, _handle) = run(&arm, r#"{"command":"pose","port":"COM3"}"#);

    assert!(!response.success);
    assert_eq!(response.msg, "Runtime error: Could not read pose");
    assert!(response.data.is_none());
}

#[test]
fn test_write_failure_becomes_runtime_error() {
    let arm = SimArm::new(pose_at(100.0, 0.0, 50.0, 0.0));
    let (mock, handle) = arm.transport();
    handle.set_fail_writes(true);
    let request = Request::new("stop").with_port("COM3");

    let response = execute(&request, &SessionConfig::immediate(), move |_| Ok(mock));
    assert!(!response.success);
    assert!(response.msg.contains("Write timeout"), "{}", response.msg);
}

#[test]
fn test_open_failure_becomes_runtime_error() {
    let request = Request::new("move").with_port("COM3");
    let response = execute::<MockTransport, _>(&request, &SessionConfig::immediate(), |_| {
        Err(SerialError::NotOpen)
    });
    assert_eq!(
        response,
        Response::failure("Runtime error: Serial port is not open")
    );
}

#[test]
fn test_config_file_changes_home_pose() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[home.approach]\nx = 180.0\ny = 10.0\nz = 160.0\n\n[home.home]\nx = 180.0\ny = 10.0\nz = 130.0\n\n[timing]\ncommand_settle_ms = 0\npose_settle_ms = 0\ninit_step_delay_ms = 0\n\n[monitor]\npoll_interval_ms = 0\n\n[serial]\nwrite_settle_ms = 0\nopen_settle_ms = 0"
    )
    .unwrap();
    let config = SessionConfig::load_from_file(file.path()).unwrap();

    let arm = SimArm::new(pose_at(100.0, 0.0, 50.0, 0.0));
    let (mock, handle) = arm.transport();
    let request = Request::new("home").with_port("COM3");
    let response = execute(&request, &config, move |_| Ok(mock));

    assert!(response.success);
    let ptp = ptp_frames(&handle);
    assert_eq!(ptp_target(&ptp[0]).3, 160.0);
    assert_eq!(ptp_target(&ptp[1]).3, 130.0);
    assert_eq!(arm.pose().y, 10.0);
}
