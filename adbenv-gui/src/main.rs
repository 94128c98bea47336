//! ADB & Fastboot environment installer GUI
//!
//! A single fixed-size window driven by [`InstallState`]. The install runs as
//! an iced command on the tokio executor, so the window keeps repainting
//! while the archive downloads.

use adbenv_lib::{
    open_terminal, Config, DownloadManager, InstallReport, InstallState, Installer,
    RegistryEnvStore,
};
use iced::alignment::Horizontal;
use iced::widget::{button, column, container, row, text};
use iced::window::{self, Position};
use iced::{
    executor, Alignment, Application, Color, Command, Element, Font, Length, Pixels, Settings,
    Size, Theme,
};
use std::borrow::Cow;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const WINDOW_TITLE: &str = "ADB & Fastboot Environment Installer";

const ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

/// Bundled UI font, family "DejaVu Sans"
const FONT_TTF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const FONT_NAME: &str = "DejaVu Sans";

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("adbenv_lib=info,adbenv_gui=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(None).unwrap_or_else(|e| {
        warn!("Ignoring configuration: {}", e);
        Config::default()
    });

    let mut settings = Settings::with_flags(config);
    settings.window = window::Settings {
        size: Size::new(500.0, 300.0),
        position: Position::Centered,
        resizable: false,
        icon: window_icon(),
        ..Default::default()
    };
    settings.fonts = vec![Cow::Borrowed(FONT_TTF)];
    settings.default_font = Font::with_name(FONT_NAME);
    settings.default_text_size = Pixels(14.0);
    settings.antialiasing = true;

    InstallerApp::run(settings)?;
    Ok(())
}

fn window_icon() -> Option<window::Icon> {
    match window::icon::from_file_data(ICON_PNG, None) {
        Ok(icon) => Some(icon),
        Err(e) => {
            warn!("Unable to load window icon: {}", e);
            None
        }
    }
}

struct InstallerApp {
    config: Config,
    state: InstallState,
    /// Last problem opening the terminal, shown under the buttons
    notice: Option<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Install,
    InstallFinished(Result<InstallReport, String>),
    OpenTerminal,
    Quit,
}

// Modern dark theme colors
mod colors {
    use iced::Color;

    pub const BACKGROUND: Color = Color::from_rgb(0.08, 0.08, 0.1);
    pub const SURFACE: Color = Color::from_rgb(0.12, 0.12, 0.15);
    pub const SURFACE_HOVER: Color = Color::from_rgb(0.16, 0.16, 0.2);
    pub const PRIMARY: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_HOVER: Color = Color::from_rgb(0.5, 0.75, 1.0);
    pub const SUCCESS: Color = Color::from_rgb(0.45, 0.85, 0.55);
    pub const ERROR: Color = Color::from_rgb(1.0, 0.45, 0.45);
    pub const TEXT_PRIMARY: Color = Color::from_rgb(1.0, 1.0, 1.0);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.75);
    pub const TEXT_DIM: Color = Color::from_rgb(0.5, 0.5, 0.55);
}

impl Application for InstallerApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Config;

    fn new(config: Config) -> (Self, Command<Message>) {
        (
            Self {
                config,
                state: InstallState::default(),
                notice: None,
            },
            Command::none(),
        )
    }

    fn title(&self) -> String {
        WINDOW_TITLE.to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Install => {
                if !self.state.begin() {
                    warn!("Install requested while {:?}, ignoring", self.state);
                    return Command::none();
                }
                info!("Starting install");
                Command::perform(run_install(self.config.clone()), Message::InstallFinished)
            }
            Message::InstallFinished(result) => {
                match &result {
                    Ok(report) => info!("Install finished in {:?}", report.target_dir),
                    Err(e) => error!("Install failed: {}", e),
                }
                self.state.finish(result);
                Command::none()
            }
            Message::OpenTerminal => {
                if let Some(dir) = self.state.target_dir() {
                    if let Err(e) = open_terminal(dir) {
                        error!("{}", e);
                        self.notice = Some(e.to_string());
                    }
                }
                Command::none()
            }
            Message::Quit => std::process::exit(self.state.exit_code()),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let body = match &self.state {
            InstallState::Idle => self.idle_view(),
            InstallState::Installing => self.installing_view(),
            InstallState::Succeeded(report) => self.succeeded_view(report),
            InstallState::Failed(message) => self.failed_view(message),
        };

        container(
            container(body)
                .padding(24)
                .width(Length::Fill)
                .style(iced::theme::Container::Custom(Box::new(CardContainerStyle))),
        )
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_y()
        .style(iced::theme::Container::Custom(Box::new(
            BackgroundContainerStyle,
        )))
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

impl InstallerApp {
    fn idle_view(&self) -> Element<'_, Message> {
        column![
            line("This will install ADB and Fastboot on your computer.", colors::TEXT_PRIMARY),
            line(
                "The latest platform tools are downloaded from Google.",
                colors::TEXT_SECONDARY
            ),
            line("Thank you for using this installer!", colors::TEXT_DIM),
            row![
                action_button("Install", true, Message::Install),
                action_button("Quit", false, Message::Quit),
            ]
            .spacing(12),
        ]
        .spacing(12)
        .align_items(Alignment::Center)
        .width(Length::Fill)
        .into()
    }

    fn installing_view(&self) -> Element<'_, Message> {
        column![line("Installing, please wait…", colors::TEXT_PRIMARY)]
            .align_items(Alignment::Center)
            .width(Length::Fill)
            .into()
    }

    fn succeeded_view(&self, report: &InstallReport) -> Element<'_, Message> {
        let mut content = column![
            line("ADB and Fastboot installed successfully.", colors::SUCCESS),
            line(
                &format!("Installed to {}", report.target_dir.display()),
                colors::TEXT_SECONDARY
            ),
            row![
                action_button("Quit", false, Message::Quit),
                action_button("Open Terminal", true, Message::OpenTerminal),
            ]
            .spacing(12),
        ]
        .spacing(12)
        .align_items(Alignment::Center)
        .width(Length::Fill);

        if let Some(notice) = &self.notice {
            content = content.push(line(notice, colors::ERROR));
        }

        content.into()
    }

    fn failed_view(&self, message: &str) -> Element<'_, Message> {
        column![
            line("Installation failed.", colors::ERROR),
            line(message, colors::TEXT_SECONDARY),
            action_button("Quit", false, Message::Quit),
        ]
        .spacing(12)
        .align_items(Alignment::Center)
        .width(Length::Fill)
        .into()
    }
}

/// Resolve the profile, open the registry and run the install
async fn run_install(config: Config) -> Result<InstallReport, String> {
    let profile = Config::user_profile().map_err(|e| e.to_string())?;
    let source = DownloadManager::new(&config).map_err(|e| e.to_string())?;
    let env = RegistryEnvStore::open().map_err(|e| e.to_string())?;

    Installer::new(config, source, env)
        .install(&profile)
        .await
        .map_err(|e| e.to_string())
}

fn line<'a>(content: &str, color: Color) -> Element<'a, Message> {
    text(content)
        .width(Length::Fill)
        .horizontal_alignment(Horizontal::Center)
        .style(iced::theme::Text::Color(color))
        .into()
}

fn action_button(label: &str, primary: bool, on_press: Message) -> Element<'_, Message> {
    button(
        text(label).style(iced::theme::Text::Color(if primary {
            colors::BACKGROUND
        } else {
            colors::TEXT_PRIMARY
        })),
    )
    .padding([8, 24])
    .style(iced::theme::Button::Custom(Box::new(ActionButtonStyle {
        primary,
    })))
    .on_press(on_press)
    .into()
}

struct BackgroundContainerStyle;

impl container::StyleSheet for BackgroundContainerStyle {
    type Style = iced::Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(colors::BACKGROUND.into()),
            ..Default::default()
        }
    }
}

struct CardContainerStyle;

impl container::StyleSheet for CardContainerStyle {
    type Style = iced::Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(colors::SURFACE.into()),
            border: iced::Border::with_radius(12.0),
            ..Default::default()
        }
    }
}

struct ActionButtonStyle {
    primary: bool,
}

impl button::StyleSheet for ActionButtonStyle {
    type Style = iced::Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(
                if self.primary {
                    colors::PRIMARY
                } else {
                    colors::SURFACE_HOVER
                }
                .into(),
            ),
            border: iced::Border::with_radius(8.0),
            ..Default::default()
        }
    }

    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(
                if self.primary {
                    colors::PRIMARY_HOVER
                } else {
                    colors::SURFACE
                }
                .into(),
            ),
            border: iced::Border::with_radius(8.0),
            ..Default::default()
        }
    }
}
