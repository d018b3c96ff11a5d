//! Command-line help system with examples and wiring guidance
//!
//! Provides detailed help text, usage examples, and contextual guidance
//! for running the loopback latency tester against real adapters.

use colored::*;

/// Help text for one CLI option
struct OptionHelp {
    short: Option<&'static str>,
    long: &'static str,
    value: &'static str,
    description: &'static str,
    example: Option<&'static str>,
}

/// Topic-driven help system for the CLI application
pub struct HelpSystem {
    platform: String,
}

impl HelpSystem {
    /// Create a new help system
    pub fn new() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
        }
    }

    /// Display the main help message with all available options
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();

        help.push_str(&self.format_header(use_colors));
        help.push('\n');
        help.push_str(&self.format_usage_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_options_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_examples_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_environment_section(use_colors));
        help.push('\n');
        help.push_str(&self.format_wiring_section(use_colors));

        help
    }

    /// Display quick help for specific topics
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "wiring" | "pins" | "loopback" => Some(self.format_wiring_section(use_colors)),
            "timeout" | "timeouts" => Some(self.format_timeout_help(use_colors)),
            "output" | "formatting" => Some(self.format_output_help(use_colors)),
            "examples" => Some(self.format_examples_section(use_colors)),
            "env" | "environment" | "config" => Some(self.format_environment_section(use_colors)),
            _ => None,
        }
    }

    /// Format the main header
    fn format_header(&self, use_colors: bool) -> String {
        let title = "Loopback Latency Tester";
        let subtitle = "Measures hardware round-trip latency through an FTDI bit-bang loopback";
        let version = env!("CARGO_PKG_VERSION");

        if use_colors {
            format!(
                "{}\n{}\nVersion: {} | Platform: {}\n",
                title.bright_cyan().bold(),
                subtitle.bright_blue(),
                version.green(),
                self.platform.yellow()
            )
        } else {
            format!(
                "{}\n{}\nVersion: {} | Platform: {}\n",
                title, subtitle, version, self.platform
            )
        }
    }

    /// Format the usage section
    fn format_usage_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "USAGE:".bright_green().bold().to_string()
        } else {
            "USAGE:".to_string()
        };

        let usage_patterns = [
            "llt [OPTIONS]",
            "llt --count <N> --timeout-ms <MS> [OPTIONS]",
            "llt --sweep [OPTIONS]",
            "llt --blink <PIN> [OPTIONS]",
            "llt --help-topic <TOPIC>",
        ];

        let mut usage = format!("{}\n", header);
        for pattern in usage_patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }

        usage
    }

    /// Format the options section
    fn format_options_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "OPTIONS:".bright_green().bold().to_string()
        } else {
            "OPTIONS:".to_string()
        };

        let options = [
            OptionHelp {
                short: Some("c"),
                long: "count",
                value: "<N>",
                description: "Number of loopback probes to run (1-10000)",
                example: Some("--count 100"),
            },
            OptionHelp {
                short: Some("t"),
                long: "timeout-ms",
                value: "<MS>",
                description: "Per-probe timeout in milliseconds (1-60000)",
                example: Some("--timeout-ms 500"),
            },
            OptionHelp {
                short: None,
                long: "vid",
                value: "<ID>",
                description: "USB vendor ID of the adapter, hex or decimal",
                example: Some("--vid 0x0403"),
            },
            OptionHelp {
                short: None,
                long: "pid",
                value: "<ID>",
                description: "USB product ID of the adapter, hex or decimal",
                example: Some("--pid 0x6001"),
            },
            OptionHelp {
                short: None,
                long: "sweep",
                value: "",
                description: "Walk a single bit across all 8 pins instead of measuring",
                example: Some("--sweep --verbose"),
            },
            OptionHelp {
                short: Some("b"),
                long: "blink",
                value: "<PIN>",
                description: "Blink one pin (1-8) until interrupted",
                example: Some("--blink 3 --blink-period-ms 250"),
            },
            OptionHelp {
                short: None,
                long: "blink-period-ms",
                value: "<MS>",
                description: "Half-period of the blink square wave",
                example: Some("--blink-period-ms 100"),
            },
            OptionHelp {
                short: None,
                long: "verbose",
                value: "",
                description: "One ping-style line per probe as it completes",
                example: Some("--verbose"),
            },
            OptionHelp {
                short: None,
                long: "debug",
                value: "",
                description: "Enable debug output with diagnostic information",
                example: Some("--debug"),
            },
            OptionHelp {
                short: None,
                long: "no-color",
                value: "",
                description: "Disable colored output",
                example: Some("--no-color"),
            },
            OptionHelp {
                short: None,
                long: "help-topic",
                value: "<TOPIC>",
                description: "Show help for a topic (wiring, timeout, output, examples, env)",
                example: Some("--help-topic wiring"),
            },
        ];

        let mut section = format!("{}\n", header);
        for option in options {
            let flags = match option.short {
                Some(short) => format!("-{}, --{} {}", short, option.long, option.value),
                None => format!("    --{} {}", option.long, option.value),
            };

            if use_colors {
                section.push_str(&format!(
                    "  {:<32} {}\n",
                    flags.bright_white(),
                    option.description
                ));
            } else {
                section.push_str(&format!("  {:<32} {}\n", flags, option.description));
            }

            if let Some(example) = option.example {
                if use_colors {
                    section.push_str(&format!("  {:<32} e.g. {}\n", "", example.bright_black()));
                } else {
                    section.push_str(&format!("  {:<32} e.g. {}\n", "", example));
                }
            }
        }

        section
    }

    /// Format the examples section
    fn format_examples_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "EXAMPLES:".bright_green().bold().to_string()
        } else {
            "EXAMPLES:".to_string()
        };

        let examples = [
            ("Quick measurement with defaults (10 probes)", "llt"),
            ("100 probes with a tight 50 ms budget", "llt --count 100 --timeout-ms 50"),
            ("Ping-style per-probe output", "llt --count 20 --verbose"),
            ("Confirm wiring with a visible bit sweep", "llt --sweep --verbose"),
            ("Blink the RTS pin at 2 Hz", "llt --blink 3 --blink-period-ms 250"),
            ("Non-default adapter", "llt --vid 0x0403 --pid 0x6015"),
        ];

        let mut section = format!("{}\n", header);
        for (description, command) in examples {
            if use_colors {
                section.push_str(&format!("  # {}\n", description.bright_black()));
                section.push_str(&format!("  {}\n\n", command.bright_white()));
            } else {
                section.push_str(&format!("  # {}\n", description));
                section.push_str(&format!("  {}\n\n", command));
            }
        }

        section
    }

    /// Format the environment variables section
    fn format_environment_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "ENVIRONMENT:".bright_green().bold().to_string()
        } else {
            "ENVIRONMENT:".to_string()
        };

        let variables = [
            ("PROBE_COUNT", "Number of probes per run"),
            ("TIMEOUT_MS", "Per-probe timeout budget in milliseconds"),
            ("FTDI_VID", "USB vendor ID (hex like 0x0403, or decimal)"),
            ("FTDI_PID", "USB product ID (hex like 0x6001, or decimal)"),
            ("ENABLE_COLOR", "true/false, colored terminal output"),
        ];

        let mut section = format!("{}\n", header);
        section.push_str("  Variables may also be placed in a .env file in the working directory.\n");
        section.push_str("  Precedence: defaults < .env < environment < command line.\n\n");
        for (name, description) in variables {
            if use_colors {
                section.push_str(&format!("  {:<16} {}\n", name.bright_white(), description));
            } else {
                section.push_str(&format!("  {:<16} {}\n", name, description));
            }
        }

        section
    }

    /// Format the wiring reference
    fn format_wiring_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "WIRING REFERENCE:".bright_green().bold().to_string()
        } else {
            "WIRING REFERENCE:".to_string()
        };

        let pins = [
            ("1", "TX ", "bit 0", "loopback output, wire to pin 2"),
            ("2", "RX ", "bit 1", "loopback input, wire to pin 1"),
            ("3", "RTS", "bit 2", "output group"),
            ("4", "CTS", "bit 3", "input group"),
            ("5", "DTR", "bit 4", "output group"),
            ("6", "DSR", "bit 5", "input group"),
            ("7", "DCD", "bit 6", "input group"),
            ("8", "RI ", "bit 7", "input group"),
        ];

        let mut section = format!("{}\n", header);
        section.push_str("  The tester needs a physical bridge between TX and RX. With the\n");
        section.push_str("  adapter unplugged, connect pin 1 directly to pin 2.\n\n");
        for (pin, name, bit, role) in pins {
            if use_colors {
                section.push_str(&format!(
                    "  pin {} {} ({})  {}\n",
                    pin.bright_white(),
                    name.bright_cyan(),
                    bit,
                    role
                ));
            } else {
                section.push_str(&format!("  pin {} {} ({})  {}\n", pin, name, bit, role));
            }
        }
        section.push_str("\n  A probe that always times out usually means the bridge is missing\n");
        section.push_str("  or on the wrong pins. Run --sweep with an LED to locate them.\n");

        section
    }

    /// Format timeout guidance
    fn format_timeout_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "TIMEOUT GUIDANCE:".bright_green().bold().to_string()
        } else {
            "TIMEOUT GUIDANCE:".to_string()
        };

        let mut section = format!("{}\n", header);
        section.push_str("  Each probe is bounded by --timeout-ms. The listener busy-polls the\n");
        section.push_str("  loopback input until the bit asserts or the budget runs out, so a\n");
        section.push_str("  larger budget only costs time on broken wiring.\n\n");
        section.push_str("  Typical FT232R round trips land well under 10 ms over a direct\n");
        section.push_str("  bridge. Suggested budgets:\n\n");

        let suggestions = [
            ("50", "tight, catches only healthy wiring"),
            ("1000", "default, tolerant of slow USB hubs"),
            ("5000", "debugging marginal connections"),
        ];

        for (ms, note) in suggestions {
            if use_colors {
                section.push_str(&format!("  --timeout-ms {:<8} {}\n", ms.bright_white(), note));
            } else {
                section.push_str(&format!("  --timeout-ms {:<8} {}\n", ms, note));
            }
        }

        section
    }

    /// Format output interpretation help
    fn format_output_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "OUTPUT REFERENCE:".bright_green().bold().to_string()
        } else {
            "OUTPUT REFERENCE:".to_string()
        };

        let mut section = format!("{}\n", header);
        section.push_str("  The summary reports, over the successful probes only:\n\n");
        section.push_str("    min/avg/max   fastest, mean, and slowest round trip (µs)\n");
        section.push_str("    spread        max minus min (µs); the min-max range\n");
        section.push_str("    std dev       sample standard deviation (µs)\n");
        section.push_str("    throughput    loopback bits per millisecond (2 bits per probe)\n\n");
        section.push_str("  With --verbose each probe prints one line as it completes:\n\n");
        section.push_str("    seq=3 latency=842 µs polls=17\n");
        section.push_str("    seq=4 timeout: no loopback transition within 1000 ms\n\n");
        section.push_str("  Latency classification: good under 1 ms, moderate 1-10 ms, poor\n");
        section.push_str("  above 10 ms.\n");

        section
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}
