//! Control-channel command construction.
//!
//! The simulated device exposes its GPIO lines through a monitor console;
//! actuators are driven with `sysbus.gpioA.<id> Set|Reset` lines. Keeping
//! command construction here leaves the reconciler transport-agnostic.

/// Build the monitor command that drives the given GPIO line.
#[must_use]
pub fn gpio_command(gpio_id: &str, on: bool) -> String {
    let verb = if on { "Set" } else { "Reset" };
    format!("sysbus.gpioA.{gpio_id} {verb}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_set_command_for_on() {
        assert_eq!(gpio_command("extraLed", true), "sysbus.gpioA.extraLed Set");
    }

    #[test]
    fn should_build_reset_command_for_off() {
        assert_eq!(gpio_command("fan0", false), "sysbus.gpioA.fan0 Reset");
    }
}
