//! Sample calendars shared by the conversion tests.

pub const NESTED: &str = "\
BEGIN:VCALENDAR
BEGIN:VEVENT
SUMMARY:Meeting
END:VEVENT
END:VCALENDAR
";

pub const TEAM_CALENDAR: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Team Calendar//EN\r\n\
X-WR-CALNAME:Team\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Berlin\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19701025T030000\r\n\
TZOFFSETFROM:+0200\r\n\
TZOFFSETTO:+0100\r\n\
END:STANDARD\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:19700329T020000\r\n\
TZOFFSETFROM:+0100\r\n\
TZOFFSETTO:+0200\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:standup@example.com\r\n\
DTSTART;TZID=Europe/Berlin:20260123T090000\r\n\
SUMMARY:Daily standup\r\n\
DESCRIPTION:Agenda:\\n- blockers\\n- plans\\, if any\r\n\
ATTENDEE;CN=\"Doe, Jane\";ROLE=CHAIR:mailto:jane@example.com\r\n\
ATTENDEE;CN=John:mailto:john@example.com\r\n\
CATEGORIES:Work,Recurring\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR\r\n\
EXDATE;TZID=Europe/Berlin:20260126T090000,20260127T090000\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT5M\r\n\
DESCRIPTION:Standup soon\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:retro@example.com\r\n\
DTSTART;VALUE=DATE:20260130\r\n\
SUMMARY:Sprint retrospective with a title long enough to be fol\r\n ded across two lines\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
