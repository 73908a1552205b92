use std::io;
use std::io::Stdout;
use std::thread::sleep;
use std::time::Duration;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{info, LevelFilter};
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout};
use tui::style::{Color, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use tui::Terminal;

use rover_control::bsp::analog::AnalogOut;
use rover_control::bsp::pin::Pin;
use rover_control::control::RoverControl;
use rover_control::edt::{Event, EDT};
use rover_control::mode::Mode;
use rover_control::voltage::V_MAX;

use crate::dummy_dac::DummyDac;
use crate::keyboard_pin::KeyboardPin;
use crate::log_buffer::LogBuffer;
use crate::sim_sensors::SimSensors;

mod dummy_dac;
mod keyboard_pin;
mod log_buffer;
mod sim_sensors;

const INITIAL_LUX: f32 = 500.0;

struct Keys {
    esc: KeyboardPin,
    enable: KeyboardPin,
    reverse: KeyboardPin,
    left: KeyboardPin,
    right: KeyboardPin,
    up: KeyboardPin,
    down: KeyboardPin,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = log_buffer::init(LevelFilter::Info)?;
    let Keys {
        esc,
        enable,
        reverse,
        left,
        right,
        up,
        down,
    } = keys();
    let throttle = DummyDac::create();
    let steering = DummyDac::create();
    let sensors = SimSensors::create(INITIAL_LUX);

    let edt = EDT::create();

    let rover_control = RoverControl::new(
        enable, reverse, &throttle, &steering, &sensors, &sensors, &edt,
    );
    rover_control.start();
    info!("A: on/off, R: reverse, arrows: tilt and light, Esc: quit");

    enable_raw_mode()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        if esc.is_down() {
            edt.exit();
        }

        match edt.poll() {
            Event::Execute { msg } => rover_control.process_message(msg),
            Event::Wait { ms } => {
                sensors.update(left.is_down(), right.is_down(), up.is_down(), down.is_down());
                draw_tui(
                    &mut terminal,
                    &throttle,
                    &steering,
                    &sensors,
                    rover_control.mode(),
                    log,
                )?;
                sleep(Duration::from_millis(ms as u64));
            }
            Event::Halt => {
                break;
            }
        }
    }

    disable_raw_mode()?;
    terminal.clear()?;

    Ok(())
}

fn draw_tui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    throttle: &DummyDac,
    steering: &DummyDac,
    sensors: &SimSensors,
    mode: Mode,
    log: &LogBuffer,
) -> io::Result<()> {
    terminal.draw(|rect| {
        let size = rect.size();
        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(4),
                    Constraint::Min(3),
                ]
                .as_ref(),
            )
            .split(size);

        rect.render_widget(dac_gauge("throttle", throttle), vertical_layout[0]);
        rect.render_widget(dac_gauge("steering", steering), vertical_layout[1]);

        let mode_style = if mode.enabled {
            Style::default().bg(Color::Green).fg(Color::Black)
        } else {
            Style::default().bg(Color::Red).fg(Color::Black)
        };
        let status_paragraph = Paragraph::new(vec![
            Spans::from(Span::styled(format!(" {} ", mode), mode_style)),
            Spans::from(Span::raw(format!(
                "lux: {:7.1}   x: {:5.1} m/s^2",
                sensors.lux(),
                sensors.x()
            ))),
        ])
        .alignment(Alignment::Left);

        let log_height = vertical_layout[3].height.saturating_sub(2) as usize;
        let log_lines: Vec<Spans> = log
            .tail(log_height)
            .into_iter()
            .map(|line| Spans::from(Span::raw(line)))
            .collect();
        let log_paragraph = Paragraph::new(log_lines).block(
            Block::default()
                .title("log")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );

        rect.render_widget(status_paragraph, vertical_layout[2]);
        rect.render_widget(log_paragraph, vertical_layout[3]);
    })?;
    Ok(())
}

fn dac_gauge<'a>(title: &'a str, dac: &DummyDac) -> Gauge<'a> {
    Gauge::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Rgb(253, 244, 220)))
        .ratio((dac.volts() / V_MAX).max(0.0).min(1.0) as f64)
        .label(format!("{:.3} V ({})", dac.volts(), dac.code()))
}

#[cfg(target_os = "linux")]
fn keys() -> Keys {
    return Keys {
        esc: KeyboardPin::create(1),
        enable: KeyboardPin::create(30),
        reverse: KeyboardPin::create(19),
        left: KeyboardPin::create(105),
        right: KeyboardPin::create(106),
        up: KeyboardPin::create(103),
        down: KeyboardPin::create(108),
    };
}

#[cfg(target_os = "windows")]
fn keys() -> Keys {
    return Keys {
        esc: KeyboardPin::create(27),
        enable: KeyboardPin::create(65),
        reverse: KeyboardPin::create(82),
        left: KeyboardPin::create(37),
        right: KeyboardPin::create(39),
        up: KeyboardPin::create(38),
        down: KeyboardPin::create(40),
    };
}
